use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlSelectElement};

use dresstour_shared::model::{DetailField, Dress, ExtraCost, PriceTier, Score, ScoreCategory};
use dresstour_shared::scoring::{total_score, MAX_TOTAL};
use dresstour_shared::Shop;

use crate::dom::{action_button, make, set_pressed, text};
use crate::state::{DressRef, State};
use crate::views::{extra_cost_line, field};

/// Tags an element with the dress it acts on.
fn target(element: &HtmlElement, shop: &Shop, dress: &Dress) -> Result<(), JsValue> {
    element.set_attribute("data-shop", &shop.id)?;
    element.set_attribute("data-dress", &dress.id)
}

fn dress_button(
    document: &Document,
    shop: &Shop,
    dress: &Dress,
    class: &str,
    label: &str,
    action: &str,
    attrs: &[(&str, &str)],
) -> Result<HtmlElement, JsValue> {
    let button = action_button(document, class, label, action, attrs)?;
    target(&button, shop, dress)?;
    Ok(button)
}

pub fn render_dress_card(
    document: &Document,
    state: &State,
    shop: &Shop,
    dress: &Dress,
) -> Result<HtmlElement, JsValue> {
    let dress_ref = DressRef::new(&shop.id, &dress.id);
    let expanded = state.is_expanded(&dress_ref);
    let total = total_score(dress);

    let card: HtmlElement = make(document, "article", "dress-card")?;
    card.style().set_property("border-color", &shop.color)?;

    let header: HtmlElement = make(document, "header", "dress-header")?;
    header.style().set_property("background-color", &shop.color)?;
    let toggle = dress_button(
        document,
        shop,
        dress,
        "dress-toggle",
        &format!("{} {}", dress.name, if expanded { "▲" } else { "▼" }),
        "toggle-dress",
        &[],
    )?;
    header.append_child(&toggle)?;
    header.append_child(&dress_button(
        document,
        shop,
        dress,
        "icon close",
        "✕",
        "ask-delete-dress",
        &[("aria-label", "드레스 삭제")],
    )?.into())?;
    if total > 0 {
        header.append_child(&text(
            document,
            "div",
            "dress-total",
            &format!("{total}/{MAX_TOTAL}점"),
        )?.into())?;
    }
    card.append_child(&header)?;

    if state.confirm_delete.as_ref() == Some(&dress_ref) {
        card.append_child(&render_delete_confirm(document, dress)?.into())?;
    }

    if expanded {
        card.append_child(&render_body(document, shop, dress, total)?.into())?;
    }
    Ok(card)
}

fn render_delete_confirm(document: &Document, dress: &Dress) -> Result<HtmlElement, JsValue> {
    let overlay: HtmlElement = make(document, "div", "confirm")?;
    let dialog: HtmlElement = make(document, "div", "confirm-dialog")?;
    dialog.append_child(&text(document, "h3", "", "드레스 삭제")?.into())?;
    dialog.append_child(&text(
        document,
        "p",
        "muted small",
        &format!("\"{}\"을(를) 삭제하시겠습니까?", dress.name),
    )?.into())?;
    dialog.append_child(&text(document, "p", "error small", "모든 데이터가 영구 삭제됩니다.")?.into())?;
    let buttons: HtmlElement = make(document, "div", "row")?;
    buttons.append_child(&action_button(document, "danger", "삭제", "confirm-delete-dress", &[])?.into())?;
    buttons.append_child(&action_button(document, "secondary", "취소", "cancel-delete-dress", &[])?.into())?;
    dialog.append_child(&buttons)?;
    overlay.append_child(&dialog)?;
    Ok(overlay)
}

fn render_body(document: &Document, shop: &Shop, dress: &Dress, total: u32) -> Result<HtmlElement, JsValue> {
    let body: HtmlElement = make(document, "div", "dress-body")?;

    let name = field(document, "input", "dress-name", &dress.name, "드레스 번호/이름")?;
    target(&name, shop, dress)?;
    body.append_child(&name)?;
    body.append_child(&price_select(document, shop, dress)?.into())?;
    let memo = field(document, "input", "dress-memo", &dress.memo, "메모")?;
    target(&memo, shop, dress)?;
    body.append_child(&memo)?;

    let sketch_row: HtmlElement = make(document, "div", "row")?;
    sketch_row.append_child(&dress_button(
        document,
        shop,
        dress,
        "sketch wide",
        "✏️ 스케치하기",
        "open-sketch",
        &[],
    )?.into())?;
    if dress.sketch_data.is_some() {
        sketch_row.append_child(&dress_button(
            document,
            shop,
            dress,
            "secondary",
            "💾 스케치 저장",
            "download-sketch",
            &[],
        )?.into())?;
    }
    body.append_child(&sketch_row)?;

    if let Some(data) = &dress.sketch_data {
        let preview: HtmlElement = make(document, "figure", "sketch-preview")?;
        let image: HtmlElement = make(document, "img", "")?;
        image.set_attribute("src", data)?;
        image.set_attribute("alt", "드레스 스케치")?;
        preview.append_child(&image)?;
        preview.append_child(&text(document, "figcaption", "muted small", "저장된 스케치")?.into())?;
        body.append_child(&preview)?;
    }

    body.append_child(&render_selected(document, dress)?.into())?;

    for detail in DetailField::ALL {
        let group: HtmlElement = make(document, "section", "detail-group")?;
        group.append_child(&text(document, "h4", "", detail.heading())?.into())?;
        let chips: HtmlElement = make(document, "div", "row wrap")?;
        let selected = dress.details.selected_label(detail);
        for option in detail.options() {
            let chip = dress_button(
                document,
                shop,
                dress,
                "chip",
                option,
                "dress-detail",
                &[("data-field", detail.key()), ("data-value", option)],
            )?;
            set_pressed(&chip, selected == Some(option));
            chips.append_child(&chip)?;
        }
        group.append_child(&chips)?;
        if detail == DetailField::ExtraCost && dress.details.extra_cost == Some(ExtraCost::Present) {
            let amount = field(
                document,
                "input",
                "dress-extra-amount",
                dress.details.extra_cost_amount.as_deref().unwrap_or_default(),
                "추가금 금액 (예: 50만원)",
            )?;
            target(&amount, shop, dress)?;
            group.append_child(&amount)?;
        }
        body.append_child(&group)?;
    }

    let scores: HtmlElement = make(document, "section", "scores")?;
    scores.append_child(&text(document, "h4", "", "평가 점수")?.into())?;
    for category in ScoreCategory::ALL {
        scores.append_child(&text(document, "div", "score-label", category.label())?.into())?;
        let row: HtmlElement = make(document, "div", "row center")?;
        let current = dress.scores.get(category).map(|score| score.value());
        for value in Score::MIN..=Score::MAX {
            let label = value.to_string();
            let button = dress_button(
                document,
                shop,
                dress,
                "score",
                &label,
                "dress-score",
                &[("data-category", category.key()), ("data-value", label.as_str())],
            )?;
            set_pressed(&button, current == Some(value));
            if current == Some(value) {
                button.style().set_property("background-color", &shop.color)?;
            }
            row.append_child(&button)?;
        }
        scores.append_child(&row)?;
    }
    body.append_child(&scores)?;

    let summary: HtmlElement = make(document, "div", "total-box")?;
    summary.append_child(&text(
        document,
        "strong",
        "",
        &format!("총점: {total}/{MAX_TOTAL}"),
    )?.into())?;
    let details = &dress.details;
    let first = [
        details.neckline.map(|value| format!("넥: {}", value.label())),
        details.sleeve.map(|value| format!("팔: {}", value.label())),
        details.skirt.map(|value| format!("치마: {}", value.label())),
    ];
    let second = [
        details.material.map(|value| format!("소재: {}", value.label())),
        details.mood.map(|value| format!("분위기: {}", value.label())),
        details.color.map(|value| format!("컬러: {}", value.label())),
    ];
    for line in [first, second] {
        let joined: Vec<String> = line.into_iter().flatten().collect();
        if !joined.is_empty() {
            summary.append_child(&text(document, "div", "muted small", &joined.join(" | "))?.into())?;
        }
    }
    if let Some(extra) = extra_cost_line(document, dress)? {
        summary.append_child(&extra)?;
    }
    body.append_child(&summary)?;
    Ok(body)
}

fn price_select(document: &Document, shop: &Shop, dress: &Dress) -> Result<HtmlSelectElement, JsValue> {
    let select: HtmlSelectElement = make(document, "select", "field")?;
    select.set_attribute("data-change", "dress-price")?;
    select.set_attribute("data-shop", &shop.id)?;
    select.set_attribute("data-dress", &dress.id)?;
    let placeholder = text(document, "option", "", "가격대 선택")?;
    placeholder.set_attribute("value", "")?;
    select.append_child(&placeholder)?;
    for tier in PriceTier::ALL {
        let option = text(document, "option", "", tier.label())?;
        option.set_attribute("value", tier.label())?;
        select.append_child(&option)?;
    }
    select.set_value(dress.price_range.map(PriceTier::label).unwrap_or_default());
    Ok(select)
}

fn render_selected(document: &Document, dress: &Dress) -> Result<HtmlElement, JsValue> {
    let panel: HtmlElement = make(document, "div", "selected")?;
    panel.append_child(&text(document, "div", "selected-title", "선택된 옵션")?.into())?;
    let chips: HtmlElement = make(document, "div", "row wrap center")?;
    for detail in DetailField::ALL {
        if detail == DetailField::ExtraCost {
            continue;
        }
        if let Some(label) = dress.details.selected_label(detail) {
            chips.append_child(&text(
                document,
                "span",
                &format!("tag tag-{}", detail.key()),
                label,
            )?.into())?;
        }
    }
    if let Some(amount) = dress.details.charged_amount() {
        chips.append_child(&text(document, "span", "tag tag-charged", &format!("추가금: {amount}"))?.into())?;
    } else if dress.details.extra_cost == Some(ExtraCost::Absent) {
        chips.append_child(&text(document, "span", "tag tag-free", "추가금 없음")?.into())?;
    }
    panel.append_child(&chips)?;
    if dress.details.is_empty() {
        panel.append_child(&text(document, "p", "muted small", "옵션을 선택해주세요")?.into())?;
    }
    Ok(panel)
}
