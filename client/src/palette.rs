use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement};

use dresstour_shared::brush::{BrushKind, BRUSH_WIDTHS, SOLID_PALETTE, TEXTURE_SIZES};
use dresstour_shared::model::{NecklineStyle, SkirtStyle};
use dresstour_shared::sketch::{AssetState, Sketch, Tool};

use crate::dom::{action_button, action_target, make, set_pressed, text};

pub enum SketchAction {
    Skirt(SkirtStyle),
    Neckline(Option<NecklineStyle>),
    Tool(Tool),
    Color(String),
    Brush(BrushKind),
    Width(f64),
    TextureSize(f64),
    Clear,
    Save,
    Close,
}

fn section(document: &Document, heading: &str) -> Result<HtmlElement, JsValue> {
    let section: HtmlElement = make(document, "section", "sketch-section")?;
    section.append_child(&text(document, "h4", "", heading)?.into())?;
    Ok(section)
}

fn row(document: &Document) -> Result<HtmlElement, JsValue> {
    make(document, "div", "chip-row")
}

fn chip(
    document: &Document,
    parent: &Element,
    label: &str,
    action: &str,
    value: &str,
    active: bool,
) -> Result<HtmlElement, JsValue> {
    let button = action_button(document, "chip", label, action, &[("data-value", value)])?;
    set_pressed(&button, active);
    parent.append_child(&button)?;
    Ok(button)
}

pub fn render_sketch_tools(
    document: &Document,
    tools_el: &HtmlElement,
    sketch: &Sketch,
) -> Result<(), JsValue> {
    tools_el.set_inner_html("");

    let skirts = section(document, "👗 치마 형태")?;
    let skirt_row = row(document)?;
    let current_skirt = sketch.skirt().unwrap_or(SkirtStyle::ALine);
    for skirt in SkirtStyle::ALL {
        chip(
            document,
            &skirt_row,
            skirt.label(),
            "sketch-skirt",
            skirt.label(),
            *skirt == current_skirt,
        )?;
    }
    skirts.append_child(&skirt_row)?;
    tools_el.append_child(&skirts)?;

    let necklines = section(document, "👗 넥라인 스타일")?;
    let neckline_row = row(document)?;
    let current_neckline = sketch.overlay().neckline();
    chip(
        document,
        &neckline_row,
        "없음",
        "sketch-neckline",
        "",
        current_neckline.is_none(),
    )?;
    for neckline in NecklineStyle::ALL {
        chip(
            document,
            &neckline_row,
            neckline.label(),
            "sketch-neckline",
            neckline.label(),
            Some(*neckline) == current_neckline,
        )?;
    }
    necklines.append_child(&neckline_row)?;
    if let Some(neckline) = current_neckline {
        necklines.append_child(&text(
            document,
            "p",
            "hint",
            &format!(
                "✨ {} 적용됨 | 메인 앱과 연동됨 · 📍 선택 모드에서 드래그: 이동 | 핸들: 크기조절",
                neckline.label()
            ),
        )?.into())?;
    }
    tools_el.append_child(&necklines)?;

    let tools = section(document, "🛠️ 도구")?;
    let tool_row = row(document)?;
    for tool in Tool::ALL {
        chip(
            document,
            &tool_row,
            tool.label(),
            "sketch-tool",
            tool.key(),
            tool == sketch.tool(),
        )?;
    }
    tools.append_child(&tool_row)?;
    let caption = match sketch.tool() {
        Tool::Select => "✨ 넥라인 선택 및 크기 조절 모드".to_string(),
        Tool::Brush => format!("✨ 브러시 모드 - {}", sketch.brush().kind.caption()),
        Tool::Eraser => "✨ 지우개 모드 - 모든 영역 지우기 가능".to_string(),
    };
    tools.append_child(&text(document, "p", "hint", &caption)?.into())?;
    tools_el.append_child(&tools)?;

    match sketch.tool() {
        Tool::Brush => render_brush_panel(document, tools_el, sketch)?,
        Tool::Eraser => render_width_panel(document, tools_el, sketch, "🎨 지우개 설정")?,
        Tool::Select => {}
    }

    let actions: HtmlElement = make(document, "div", "sketch-actions")?;
    actions.append_child(&action_button(document, "secondary", "🗑️ 그림 지우기", "sketch-clear", &[])?.into())?;
    let save = action_button(document, "primary", "💾 저장", "sketch-save", &[])?;
    if !sketch.can_save() {
        save.set_attribute("disabled", "")?;
    }
    actions.append_child(&save)?;
    actions.append_child(&action_button(document, "secondary", "← 돌아가기", "sketch-close", &[])?.into())?;
    tools_el.append_child(&actions)?;

    let status = match sketch.background() {
        AssetState::Loading(_) => Some("이미지 로딩 중..."),
        AssetState::Failed => Some("드레스 이미지를 불러오지 못했습니다."),
        AssetState::Idle | AssetState::Ready => match sketch.neckline_art() {
            AssetState::Failed if current_neckline.is_some() => {
                Some("넥라인 이미지를 불러오지 못했습니다.")
            }
            _ => None,
        },
    };
    if let Some(status) = status {
        tools_el.append_child(&text(document, "p", "sketch-status", status)?.into())?;
    }
    Ok(())
}

fn render_brush_panel(document: &Document, tools_el: &HtmlElement, sketch: &Sketch) -> Result<(), JsValue> {
    let brush = sketch.brush();
    let panel = section(document, "🎨 브러시 설정")?;

    panel.append_child(&text(document, "h6", "", "일반 색상")?.into())?;
    let colors = row(document)?;
    for (color, name) in SOLID_PALETTE {
        let swatch = chip(
            document,
            &colors,
            "",
            "sketch-color",
            color,
            brush.kind == BrushKind::Solid && brush.color == color,
        )?;
        swatch.set_class_name("swatch");
        swatch.set_attribute("aria-label", name)?;
        swatch.style().set_property("background", color)?;
    }
    panel.append_child(&colors)?;

    panel.append_child(&text(document, "h6", "", "특수 효과")?.into())?;
    let textures = row(document)?;
    for kind in BrushKind::TEXTURES {
        chip(
            document,
            &textures,
            kind.button_label(),
            "sketch-brush",
            kind.key(),
            brush.kind == kind,
        )?;
    }
    panel.append_child(&textures)?;

    if brush.kind.is_texture() {
        panel.append_child(&text(document, "h6", "", "질감 크기")?.into())?;
        let sizes = row(document)?;
        for size in TEXTURE_SIZES {
            chip(
                document,
                &sizes,
                &format!("{size}px"),
                "sketch-texture",
                &size.to_string(),
                brush.texture_size == size,
            )?;
        }
        panel.append_child(&sizes)?;
        tools_el.append_child(&panel)?;
        Ok(())
    } else {
        tools_el.append_child(&panel)?;
        render_width_panel(document, tools_el, sketch, "브러시 굵기")
    }
}

fn render_width_panel(
    document: &Document,
    tools_el: &HtmlElement,
    sketch: &Sketch,
    heading: &str,
) -> Result<(), JsValue> {
    let panel = section(document, heading)?;
    let widths = row(document)?;
    for width in BRUSH_WIDTHS {
        chip(
            document,
            &widths,
            &format!("{width}px"),
            "sketch-width",
            &width.to_string(),
            sketch.brush().width == width,
        )?;
    }
    panel.append_child(&widths)?;
    if sketch.tool() == Tool::Eraser {
        panel.append_child(&text(document, "p", "hint", "🔥 지우개는 선택한 크기의 8배로 작동!")?.into())?;
    }
    tools_el.append_child(&panel)?;
    Ok(())
}

pub fn sketch_action_from_event(event: &Event) -> Option<SketchAction> {
    let element = action_target(event)?;
    if element.has_attribute("disabled") {
        return None;
    }
    let action = element.get_attribute("data-action")?;
    let value = element.get_attribute("data-value").unwrap_or_default();
    match action.as_str() {
        "sketch-skirt" => SkirtStyle::from_label(&value).map(SketchAction::Skirt),
        "sketch-neckline" if value.is_empty() => Some(SketchAction::Neckline(None)),
        "sketch-neckline" => NecklineStyle::from_label(&value).map(|style| SketchAction::Neckline(Some(style))),
        "sketch-tool" => Tool::from_key(&value).map(SketchAction::Tool),
        "sketch-color" => Some(SketchAction::Color(value)),
        "sketch-brush" => BrushKind::from_key(&value).map(SketchAction::Brush),
        "sketch-width" => value.parse().ok().map(SketchAction::Width),
        "sketch-texture" => value.parse().ok().map(SketchAction::TextureSize),
        "sketch-clear" => Some(SketchAction::Clear),
        "sketch-save" => Some(SketchAction::Save),
        "sketch-close" => Some(SketchAction::Close),
        _ => None,
    }
}
