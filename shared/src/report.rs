use std::fmt::Write as _;

use crate::catalog::Catalog;
use crate::model::{Dress, ExtraCost, PriceTier, ScoreCategory, Shop};
use crate::scoring::{average_winner, format_average, shop_stats, top_dresses, total_score, MAX_TOTAL};

pub const DRESSES_PER_PAGE: usize = 4;
const CARD_COLUMN_STEP: usize = 360;
const CARD_ROW_STEP: usize = 450;
const CARD_LEFT: usize = 30;
const CARD_TOP: usize = 120;

/// Accent border and background for the first three ranks.
const PODIUM: [(&str, &str); 3] = [
    ("#fbbf24", "#fef3c7"),
    ("#9ca3af", "#f3f4f6"),
    ("#fb923c", "#fed7aa"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl ReportDate {
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub fn korean(&self) -> String {
        format!("{}. {}. {}.", self.year, self.month, self.day)
    }
}

pub fn report_file_name(date: ReportDate) -> String {
    format!("드레스샵투어리포트_{}.pdf", date.iso())
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// The paginated comparison report, one HTML fragment per page.
#[derive(Clone, Debug)]
pub struct Report {
    date: ReportDate,
    pages: Vec<String>,
}

impl Report {
    pub fn build(catalog: &Catalog, date: ReportDate) -> Self {
        let mut pages = vec![title_page(catalog, date)];
        pages.extend(catalog.shops().iter().map(shop_page));
        pages.push(summary_page(catalog));
        Self { date, pages }
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn file_name(&self) -> String {
        report_file_name(self.date)
    }

    /// A printable document. Page numbers are stamped once every page exists.
    pub fn to_document(&self) -> String {
        let total = self.pages.len();
        let mut body = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            let _ = write!(
                body,
                "<section class=\"page\">{page}<div class=\"page-number\">{} / {total}</div></section>",
                index + 1
            );
        }
        let title = escape_html(self.file_name().trim_end_matches(".pdf"));
        format!(
            "<!doctype html><html><head><meta charset=\"utf-8\" /><title>{title}</title><style>@page{{size:A4;margin:0;}}html,body{{margin:0;padding:0;}}body{{font-family:'Malgun Gothic',sans-serif;}}.page{{position:relative;width:800px;height:1131px;padding:30px;box-sizing:border-box;background:white;page-break-after:always;overflow:hidden;}}.page:last-child{{page-break-after:auto;}}.page-number{{position:absolute;right:40px;bottom:14px;font-size:10px;color:#808080;}}</style></head><body>{body}</body></html>"
        )
    }
}

fn title_page(catalog: &Catalog, date: ReportDate) -> String {
    format!(
        "<div style=\"text-align:center;padding-top:10px;\">\
<h1 style=\"font-size:32px;margin-bottom:20px;color:#333;\">💍 드레스샵 투어 비교 리포트</h1>\
<p style=\"font-size:20px;margin-bottom:10px;color:#666;\">생성일: {}</p>\
<p style=\"font-size:16px;color:#888;\">총 {}개 업체 | {}개 드레스</p></div>",
        date.korean(),
        catalog.shops().len(),
        catalog.dress_count()
    )
}

fn shop_page(shop: &Shop) -> String {
    let color = escape_html(&shop.color);
    let cards: String = shop
        .dresses
        .iter()
        .take(DRESSES_PER_PAGE)
        .enumerate()
        .map(|(index, dress)| dress_card(dress, &color, index))
        .collect();
    format!(
        "<div style=\"background:{color};color:white;padding:20px;border-radius:8px;margin-bottom:20px;\">\
<h2 style=\"font-size:24px;margin:0;\">{} {}</h2>\
<p style=\"font-size:14px;margin:10px 0 0 0;opacity:0.9;\">{}</p></div>\
<div style=\"position:relative;height:900px;\">{cards}</div>",
        escape_html(&shop.emoji),
        escape_html(&shop.name),
        escape_html(&shop.description)
    )
}

pub fn card_origin(index: usize) -> (usize, usize) {
    let col = index % 2;
    let row = index / 2;
    (col * CARD_COLUMN_STEP + CARD_LEFT, row * CARD_ROW_STEP + CARD_TOP)
}

fn dress_card(dress: &Dress, color: &str, index: usize) -> String {
    let (left, top) = card_origin(index);
    let total = total_score(dress);
    let mut card = format!(
        "<div style=\"position:absolute;left:{left}px;top:{top}px;width:340px;height:420px;box-sizing:border-box;border:2px solid {color};border-radius:8px;padding:15px;background:white;box-shadow:0 2px 4px rgba(0,0,0,0.1);\">\
<h3 style=\"font-size:18px;margin-bottom:10px;color:{color};font-weight:bold;\">{}</h3>\
<p style=\"font-size:14px;margin-bottom:8px;font-weight:bold;\"><strong>점수:</strong> {total}/{MAX_TOTAL}</p>",
        escape_html(&dress.name)
    );
    if let Some(tier) = dress.price_range {
        card.push_str(&line("가격", PriceTier::label(tier), None));
    }
    let details = &dress.details;
    let rows = [
        ("치마", details.skirt.map(|value| value.label())),
        ("넥라인", details.neckline.map(|value| value.label())),
        ("소매", details.sleeve.map(|value| value.label())),
        ("소재", details.material.map(|value| value.label())),
        ("분위기", details.mood.map(|value| value.label())),
    ];
    for (heading, value) in rows {
        if let Some(value) = value {
            card.push_str(&line(heading, value, None));
        }
    }
    match (details.extra_cost, details.charged_amount()) {
        (Some(ExtraCost::Present), Some(amount)) => {
            card.push_str(&line("추가금", amount, Some("red")));
        }
        (Some(ExtraCost::Absent), _) => {
            card.push_str(&line("추가금", ExtraCost::Absent.label(), Some("green")));
        }
        _ => {}
    }
    if total > 0 {
        let breakdown: String = ScoreCategory::ALL
            .iter()
            .map(|category| {
                let value = dress.scores.get(*category).map_or(0, |score| score.value());
                format!(
                    "<span style=\"font-size:10px;color:#666;margin-right:8px;\">{}: {value}</span>",
                    category.short_label()
                )
            })
            .collect();
        let _ = write!(
            card,
            "<div style=\"margin-top:10px;padding:8px;background:#f8f9fa;border-radius:4px;border-left:3px solid {color};\">\
<p style=\"font-size:11px;font-weight:bold;margin-bottom:4px;color:{color};\">📊 평가 점수</p>\
<div style=\"line-height:1.3;\">{breakdown}</div></div>"
        );
    }
    if !dress.memo.is_empty() {
        let _ = write!(
            card,
            "<p style=\"font-size:11px;color:#666;margin-top:8px;\"><strong>메모:</strong> {}</p>",
            escape_html(&dress.memo)
        );
    }
    if let Some(sketch) = &dress.sketch_data {
        let _ = write!(
            card,
            "<div style=\"margin-top:8px;\"><img src=\"{}\" style=\"width:60px;height:60px;object-fit:contain;border:1px solid #ddd;border-radius:4px;\" />\
<p style=\"font-size:9px;color:#8b5cf6;margin:2px 0 0 0;\">✏️ 스케치</p></div>",
            escape_html(sketch)
        );
    }
    card.push_str("</div>");
    card
}

fn line(heading: &str, value: &str, color: Option<&str>) -> String {
    let color = color.map(|color| format!("color:{color};")).unwrap_or_default();
    format!(
        "<p style=\"font-size:12px;margin-bottom:4px;{color}\"><strong>{heading}:</strong> {}</p>",
        escape_html(value)
    )
}

fn summary_page(catalog: &Catalog) -> String {
    let top: String = top_dresses(catalog, 3)
        .iter()
        .zip(PODIUM)
        .enumerate()
        .map(|(index, (entry, (border, background)))| {
            let details = &entry.dress.details;
            format!(
                "<div style=\"padding:15px;margin-bottom:10px;border-radius:8px;border-left:4px solid {border};background:{background};\">\
<h4 style=\"margin:0 0 5px 0;font-size:16px;\">{}위. {} ({} {})</h4>\
<p style=\"margin:0;font-size:14px;color:#666;\">{}점 | {} {}</p></div>",
                index + 1,
                escape_html(&entry.dress.name),
                escape_html(&entry.shop.emoji),
                escape_html(&entry.shop.name),
                entry.total,
                details.skirt.map_or("", |value| value.label()),
                details.neckline.map_or("", |value| value.label()),
            )
        })
        .collect();
    let stats = shop_stats(catalog);
    let averages: String = stats
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let color = escape_html(&entry.shop.color);
            let trophy = if index == 0 && entry.average > 0.0 { " 🏆" } else { "" };
            format!(
                "<div style=\"display:flex;justify-content:space-between;align-items:center;padding:12px;margin-bottom:8px;border-radius:6px;background:{color}20;border-left:3px solid {color};\">\
<span style=\"font-size:14px;font-weight:bold;\">{} {}{trophy}</span>\
<span style=\"font-size:14px;font-weight:bold;\">{}점 ({}개)</span></div>",
                escape_html(&entry.shop.emoji),
                escape_html(&entry.shop.name),
                format_average(entry.average),
                entry.scored
            )
        })
        .collect();
    let recommendation = average_winner(&stats)
        .map(|winner| {
            format!(
                "<div style=\"text-align:center;padding:20px;margin-top:20px;background:linear-gradient(135deg,#ddd6fe,#fce7f3);border-radius:8px;\">\
<h4 style=\"margin:0 0 5px 0;font-size:16px;\">🏆 최종 추천: {} {}</h4>\
<p style=\"margin:0;font-size:14px;color:#666;\">평균 {}점으로 1위!</p></div>",
                escape_html(&winner.shop.emoji),
                escape_html(&winner.shop.name),
                format_average(winner.average)
            )
        })
        .unwrap_or_default();
    format!(
        "<div style=\"background:linear-gradient(135deg,#8b5cf6,#ec4899);color:white;padding:20px;border-radius:12px;margin-bottom:30px;\">\
<h2 style=\"font-size:24px;margin:0;text-align:center;\">🏆 최종 분석 리포트</h2></div>\
<div style=\"margin-bottom:30px;\"><h3 style=\"font-size:20px;color:#8b5cf6;margin-bottom:15px;\">🥇 TOP 3 드레스</h3>{top}</div>\
<div><h3 style=\"font-size:20px;color:#10b981;margin-bottom:15px;\">📊 업체별 평균 점수</h3>{averages}{recommendation}</div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DressChange, Edit, ShopPatch};
    use crate::model::Score;

    const DATE: ReportDate = ReportDate {
        year: 2026,
        month: 3,
        day: 7,
    };

    fn score_all(catalog: Catalog, shop_id: &str, dress_id: &str, value: u8) -> Catalog {
        ScoreCategory::ALL.iter().fold(catalog, |catalog, category| {
            catalog
                .apply(Edit::UpdateDress {
                    shop_id: shop_id.into(),
                    dress_id: dress_id.into(),
                    change: DressChange::Score(*category, Score::new(value).unwrap()),
                })
                .unwrap()
        })
    }

    #[test]
    fn pages_are_title_shops_then_summary() {
        let report = Report::build(&Catalog::seed(), DATE);
        assert_eq!(report.pages().len(), 4);
        assert!(report.pages()[0].contains("총 2개 업체 | 8개 드레스"));
        assert!(report.pages()[0].contains("생성일: 2026. 3. 7."));
        assert!(report.pages()[1].contains("메라키"));
        assert!(report.pages()[3].contains("최종 분석 리포트"));
    }

    #[test]
    fn file_name_carries_iso_date() {
        assert_eq!(report_file_name(DATE), "드레스샵투어리포트_2026-03-07.pdf");
    }

    #[test]
    fn page_numbers_count_every_page() {
        let document = Report::build(&Catalog::seed(), DATE).to_document();
        assert!(document.contains(">1 / 4<"));
        assert!(document.contains(">4 / 4<"));
        assert!(!document.contains("5 / 4"));
    }

    #[test]
    fn shop_page_shows_at_most_four_dresses_in_grid() {
        let catalog = Catalog::seed()
            .apply(Edit::AddDress {
                shop_id: "meraki".into(),
            })
            .unwrap();
        let report = Report::build(&catalog, DATE);
        let page = &report.pages()[1];
        assert!(page.contains("드레스 4"));
        assert!(!page.contains("드레스 5"));
        assert!(page.contains("left:390px;top:570px;"));
        assert_eq!(card_origin(1), (390, 120));
    }

    #[test]
    fn score_breakdown_only_for_scored_dresses() {
        let catalog = score_all(Catalog::seed(), "meraki", "meraki_dress1", 4);
        let report = Report::build(&catalog, DATE);
        let page = &report.pages()[1];
        assert!(page.contains("24/30"));
        assert_eq!(page.matches("📊 평가 점수").count(), 1);
        assert!(page.contains("예식홀조화: 4"));
    }

    #[test]
    fn summary_recommends_average_winner() {
        let catalog = score_all(Catalog::seed(), "edeline", "edeline_dress2", 5);
        let summary = Report::build(&catalog, DATE).pages()[3].clone();
        assert!(summary.contains("1위. 드레스 2 (✨ 에델린)"));
        assert!(summary.contains("🏆 최종 추천: ✨ 에델린"));
        assert!(summary.contains("평균 30.0점으로 1위!"));
        assert!(summary.contains("#fef3c7"));
    }

    #[test]
    fn no_recommendation_without_scores() {
        let summary = Report::build(&Catalog::seed(), DATE).pages()[3].clone();
        assert!(!summary.contains("최종 추천"));
        assert!(!summary.contains("🏆</span>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let catalog = Catalog::seed()
            .apply(Edit::UpdateShop {
                shop_id: "meraki".into(),
                patch: ShopPatch {
                    name: Some("<b>메라키</b>".into()),
                    ..ShopPatch::default()
                },
            })
            .unwrap();
        let report = Report::build(&catalog, DATE);
        let page = &report.pages()[1];
        assert!(page.contains("&lt;b&gt;메라키&lt;/b&gt;"));
        assert!(!page.contains("<b>메라키"));
    }
}
