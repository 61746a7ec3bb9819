use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use dresstour_shared::model::{Dress, ExtraCost, SHOP_COLORS, SHOP_EMOJIS};
use dresstour_shared::scoring::{
    average_winner, best_dress, format_average, shop_stats, top_dresses, total_score,
};
use dresstour_shared::Shop;

use crate::card::render_dress_card;
use crate::dom::{action_button, make, set_pressed, text};
use crate::state::{State, Tab};

pub const GATE_INPUT_ID: &str = "gateCode";

/// An `<input>` or `<textarea>` whose edits are reported through `data-input`.
pub fn field(
    document: &Document,
    tag: &str,
    name: &str,
    value: &str,
    placeholder: &str,
) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = make(document, tag, "field")?;
    element.set_attribute("data-input", name)?;
    element.set_attribute("placeholder", placeholder)?;
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_type("text");
        input.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_rows(2);
        area.set_value(value);
    }
    Ok(element)
}

pub fn render(document: &Document, root: &HtmlElement, state: &State) -> Result<(), JsValue> {
    root.set_inner_html("");
    if !state.unlocked {
        return render_gate(document, root, state);
    }
    render_header(document, root, state)?;
    render_tabs(document, root, state)?;
    let panel: HtmlElement = make(document, "main", "panel")?;
    match &state.tab {
        Tab::Manage => render_manage(document, &panel, state)?,
        Tab::Summary => render_summary(document, &panel, state)?,
        Tab::Shop(id) => {
            if let Some(shop) = state.catalog.shop(id) {
                render_shop(document, &panel, state, shop)?;
            }
        }
    }
    root.append_child(&panel)?;
    Ok(())
}

fn render_gate(document: &Document, root: &HtmlElement, state: &State) -> Result<(), JsValue> {
    let card: HtmlElement = make(document, "div", "gate")?;
    card.append_child(&text(document, "h2", "", "🔐 드레스샵 투어 시스템")?.into())?;
    card.append_child(&text(
        document,
        "p",
        "muted",
        "시스템 사용을 위해 비밀번호를 입력해주세요",
    )?.into())?;
    let form: HtmlElement = make(document, "form", "gate-form")?;
    form.set_attribute("data-form", "gate")?;
    let input: HtmlInputElement = make(document, "input", "gate-input")?;
    input.set_id(GATE_INPUT_ID);
    input.set_type("password");
    input.set_placeholder("비밀번호 입력");
    form.append_child(&input)?;
    if let Some(error) = &state.gate_error {
        form.append_child(&text(document, "p", "error", error)?.into())?;
    }
    let submit = text(document, "button", "primary", "확인")?;
    submit.set_attribute("type", "submit")?;
    form.append_child(&submit)?;
    card.append_child(&form)?;
    card.append_child(&text(
        document,
        "p",
        "footnote",
        "💍 Wedding Dress Tour Comparison System v1.0",
    )?.into())?;
    root.append_child(&card)?;
    let _ = input.focus();
    Ok(())
}

fn render_header(document: &Document, root: &HtmlElement, state: &State) -> Result<(), JsValue> {
    let header: HtmlElement = make(document, "header", "app-header")?;
    header.append_child(&text(document, "h1", "", "💍 드레스샵 투어 비교 체크리스트")?.into())?;
    header.append_child(&text(document, "p", "muted", "업체별 드레스 비교")?.into())?;
    let export = action_button(document, "report", "📄 PDF 리포트 생성", "export-report", &[])?;
    if state.catalog.is_empty() {
        export.set_attribute("disabled", "")?;
    }
    header.append_child(&export)?;
    root.append_child(&header)?;
    Ok(())
}

fn render_tabs(document: &Document, root: &HtmlElement, state: &State) -> Result<(), JsValue> {
    let nav: HtmlElement = make(document, "nav", "tabs")?;
    let tab = |label: &str, target: Tab, color: Option<&str>| -> Result<(), JsValue> {
        let button = action_button(document, "tab", label, "tab", &[("data-tab", target.key())])?;
        let active = state.tab == target;
        set_pressed(&button, active);
        if let (true, Some(color)) = (active, color) {
            button.style().set_property("background-color", color)?;
        }
        nav.append_child(&button)?;
        Ok(())
    };
    tab("⚙️ 관리", Tab::Manage, None)?;
    for shop in state.catalog.shops() {
        tab(
            &format!("{} {}", shop.emoji, shop.name),
            Tab::Shop(shop.id.clone()),
            Some(shop.color.as_str()),
        )?;
    }
    tab("🏆 최종정리", Tab::Summary, None)?;
    root.append_child(&nav)?;
    Ok(())
}

fn render_manage(document: &Document, panel: &HtmlElement, state: &State) -> Result<(), JsValue> {
    let heading: HtmlElement = make(document, "div", "row spread")?;
    heading.append_child(&text(document, "h3", "", "업체 관리")?.into())?;
    heading.append_child(&action_button(
        document,
        "add",
        "+ 업체 추가",
        "show-shop-form",
        &[],
    )?.into())?;
    panel.append_child(&heading)?;

    if state.adding_shop {
        panel.append_child(&render_shop_form(document, state)?.into())?;
    }

    for shop in state.catalog.shops() {
        let card: HtmlElement = make(document, "div", "shop-card")?;
        card.style().set_property("border-color", &shop.color)?;
        if state.editing_shop.as_deref() == Some(shop.id.as_str()) {
            let name = field(document, "input", "shop-name", &shop.name, "업체명")?;
            name.set_attribute("data-shop", shop.id.as_str())?;
            card.append_child(&name)?;
            let description =
                field(document, "textarea", "shop-description", &shop.description, "업체 설명")?;
            description.set_attribute("data-shop", shop.id.as_str())?;
            card.append_child(&description)?;
            card.append_child(&action_button(
                document,
                "primary",
                "완료",
                "finish-edit-shop",
                &[],
            )?.into())?;
        } else {
            let row: HtmlElement = make(document, "div", "row spread")?;
            row.append_child(&text(
                document,
                "strong",
                "",
                &format!("{} {}", shop.emoji, shop.name),
            )?.into())?;
            let buttons: HtmlElement = make(document, "div", "row")?;
            buttons.append_child(&action_button(
                document,
                "icon",
                "✏️",
                "edit-shop",
                &[("data-shop", shop.id.as_str()), ("aria-label", "수정")],
            )?.into())?;
            buttons.append_child(&action_button(
                document,
                "icon danger",
                "🗑️",
                "delete-shop",
                &[("data-shop", shop.id.as_str()), ("aria-label", "삭제")],
            )?.into())?;
            row.append_child(&buttons)?;
            card.append_child(&row)?;
            card.append_child(&text(document, "p", "muted", &shop.description)?.into())?;
            card.append_child(&text(
                document,
                "p",
                "muted small",
                &format!("드레스 {}개", shop.dresses.len()),
            )?.into())?;
        }
        panel.append_child(&card)?;
    }
    Ok(())
}

fn render_shop_form(document: &Document, state: &State) -> Result<HtmlElement, JsValue> {
    let form: HtmlElement = make(document, "div", "shop-card draft")?;
    form.append_child(&field(document, "input", "draft-name", &state.draft.name, "업체명")?.into())?;
    if let Some(error) = &state.draft_error {
        form.append_child(&text(document, "p", "error small", error)?.into())?;
    }
    form.append_child(&field(
        document,
        "textarea",
        "draft-description",
        &state.draft.description,
        "업체 설명",
    )?.into())?;

    form.append_child(&text(document, "h4", "", "색상")?.into())?;
    let colors: HtmlElement = make(document, "div", "row")?;
    for (color, name) in SHOP_COLORS {
        let swatch = action_button(
            document,
            "swatch",
            "",
            "draft-color",
            &[("data-value", color), ("title", name), ("aria-label", name)],
        )?;
        swatch.style().set_property("background", color)?;
        set_pressed(&swatch, state.draft.color == color);
        colors.append_child(&swatch)?;
    }
    form.append_child(&colors)?;

    form.append_child(&text(document, "h4", "", "아이콘")?.into())?;
    let emojis: HtmlElement = make(document, "div", "row wrap")?;
    for emoji in SHOP_EMOJIS {
        let button = action_button(document, "emoji", emoji, "draft-emoji", &[("data-value", emoji)])?;
        set_pressed(&button, state.draft.emoji == emoji);
        emojis.append_child(&button)?;
    }
    form.append_child(&emojis)?;

    let buttons: HtmlElement = make(document, "div", "row")?;
    buttons.append_child(&action_button(document, "primary", "추가", "submit-shop-form", &[])?.into())?;
    buttons.append_child(&action_button(document, "secondary", "취소", "cancel-shop-form", &[])?.into())?;
    form.append_child(&buttons)?;
    Ok(form)
}

fn render_shop(
    document: &Document,
    panel: &HtmlElement,
    state: &State,
    shop: &Shop,
) -> Result<(), JsValue> {
    let intro: HtmlElement = make(document, "section", "shop-intro")?;
    intro.style().set_property("border-left-color", &shop.color)?;
    let title = text(document, "h2", "shop-title", &format!("{} {}", shop.emoji, shop.name))?;
    title.style().set_property("background-color", &shop.color)?;
    intro.append_child(&title)?;
    let description = field(document, "textarea", "shop-description", &shop.description, "업체 설명")?;
    description.set_attribute("data-shop", shop.id.as_str())?;
    intro.append_child(&description)?;
    intro.append_child(&action_button(
        document,
        "add wide",
        "+ 드레스 추가",
        "add-dress",
        &[("data-shop", shop.id.as_str())],
    )?.into())?;
    panel.append_child(&intro)?;

    for dress in &shop.dresses {
        panel.append_child(&render_dress_card(document, state, shop, dress)?.into())?;
    }
    Ok(())
}

/// "A라인 / 라운드 / 반팔" style one-liner used by the summary cards.
fn shape_line(dress: &Dress) -> String {
    let details = &dress.details;
    let mut line = String::new();
    if let Some(skirt) = details.skirt {
        line.push_str(skirt.label());
        line.push_str(" / ");
    }
    if let Some(neckline) = details.neckline {
        line.push_str(neckline.label());
        line.push_str(" / ");
    }
    if let Some(sleeve) = details.sleeve {
        line.push_str(sleeve.label());
    }
    line
}

pub fn extra_cost_line(document: &Document, dress: &Dress) -> Result<Option<HtmlElement>, JsValue> {
    if let Some(amount) = dress.details.charged_amount() {
        return text(document, "div", "extra charged", &format!("추가금: {amount}")).map(Some);
    }
    if dress.details.extra_cost == Some(ExtraCost::Absent) {
        return text(document, "div", "extra free", "추가금 없음").map(Some);
    }
    Ok(None)
}

fn thumbnail(document: &Document, parent: &Element, dress: &Dress, class: &str) -> Result<(), JsValue> {
    if let Some(data) = &dress.sketch_data {
        let image: HtmlElement = make(document, "img", class)?;
        image.set_attribute("src", data)?;
        image.set_attribute("alt", "스케치")?;
        parent.append_child(&image)?;
    }
    Ok(())
}

fn render_summary(document: &Document, panel: &HtmlElement, state: &State) -> Result<(), JsValue> {
    let catalog = &state.catalog;
    panel.append_child(&text(document, "h2", "summary-banner", "🏆 최종 비교 정리")?.into())?;

    for shop in catalog.shops() {
        let card: HtmlElement = make(document, "section", "summary-card")?;
        card.style().set_property("border-left-color", &shop.color)?;
        let heading = text(document, "h3", "", &format!("🥇 {} 최고 드레스", shop.name))?;
        heading.style().set_property("color", &shop.color)?;
        card.append_child(&heading)?;
        match best_dress(shop) {
            Some(dress) => {
                card.append_child(&text(
                    document,
                    "strong",
                    "",
                    &format!("{} - {}점", dress.name, total_score(dress)),
                )?.into())?;
                card.append_child(&text(document, "div", "muted small", &shape_line(dress))?.into())?;
                let mut meta = dress
                    .price_range
                    .map(|tier| tier.label().to_string())
                    .unwrap_or_default();
                if !dress.memo.is_empty() {
                    meta.push_str(&format!(" | {}", dress.memo));
                }
                card.append_child(&text(document, "div", "muted small", &meta)?.into())?;
                if let Some(extra) = extra_cost_line(document, dress)? {
                    card.append_child(&extra)?;
                }
                thumbnail(document, &card, dress, "thumb")?;
            }
            None => {
                card.append_child(&text(document, "p", "muted", "평가 완료된 드레스 없음")?.into())?;
            }
        }
        panel.append_child(&card)?;
    }

    let top: HtmlElement = make(document, "section", "summary-card")?;
    top.append_child(&text(document, "h3", "accent", "🏆 전체 TOP 3 드레스")?.into())?;
    let ranked = top_dresses(catalog, 3);
    if ranked.is_empty() {
        top.append_child(&text(document, "p", "muted center", "평가 완료된 드레스가 없습니다")?.into())?;
    }
    for (index, entry) in ranked.iter().enumerate() {
        let row: HtmlElement = make(document, "div", &format!("podium place-{}", index + 1))?;
        let line: HtmlElement = make(document, "div", "row spread")?;
        line.append_child(&text(
            document,
            "strong",
            "",
            &format!(
                "{}위. {} ({} {})",
                index + 1,
                entry.dress.name,
                entry.shop.emoji,
                entry.shop.name
            ),
        )?.into())?;
        line.append_child(&text(document, "strong", "", &format!("{}점", entry.total))?.into())?;
        row.append_child(&line)?;
        row.append_child(&text(document, "div", "muted small", &shape_line(entry.dress))?.into())?;
        if let Some(extra) = extra_cost_line(document, entry.dress)? {
            row.append_child(&extra)?;
        }
        thumbnail(document, &row, entry.dress, "thumb small")?;
        top.append_child(&row)?;
    }
    panel.append_child(&top)?;

    let averages: HtmlElement = make(document, "section", "summary-card")?;
    averages.append_child(&text(document, "h3", "accent-green", "📊 업체별 평균 점수")?.into())?;
    let stats = shop_stats(catalog);
    let winner = average_winner(&stats);
    for (index, entry) in stats.iter().enumerate() {
        let row: HtmlElement = make(document, "div", "row spread average")?;
        row.style()
            .set_property("background-color", &format!("{}20", entry.shop.color))?;
        let trophy = if index == 0 && winner.is_some() { " 🏆" } else { "" };
        row.append_child(&text(
            document,
            "span",
            "",
            &format!("{} {}{trophy}", entry.shop.emoji, entry.shop.name),
        )?.into())?;
        row.append_child(&text(
            document,
            "strong",
            "",
            &format!("{}점 ({}개)", format_average(entry.average), entry.scored),
        )?.into())?;
        averages.append_child(&row)?;
    }
    if let Some(winner) = winner {
        let banner: HtmlElement = make(document, "div", "winner")?;
        banner.append_child(&text(
            document,
            "strong",
            "",
            &format!("🏆 평균 점수 우승: {} {}", winner.shop.emoji, winner.shop.name),
        )?.into())?;
        banner.append_child(&text(
            document,
            "div",
            "muted small",
            &format!("평균 {}점으로 1위!", format_average(winner.average)),
        )?.into())?;
        averages.append_child(&banner)?;
    }
    panel.append_child(&averages)?;
    Ok(())
}
