use dresstour_shared::gate::check_access;
use dresstour_shared::model::{DetailField, PriceTier, Score, ScoreCategory};
use dresstour_shared::{CatalogError, Detail, DressChange, Edit, ShopPatch};

use crate::state::{DressRef, State, Tab};

#[derive(Clone, Debug, PartialEq)]
pub enum UiAction {
    Unlock(String),
    SelectTab(Tab),
    ShowShopForm,
    CancelShopForm,
    SubmitShopForm,
    DraftName(String),
    DraftDescription(String),
    DraftColor(String),
    DraftEmoji(String),
    EditShop(String),
    FinishEditShop,
    DeleteShop(String),
    PatchShop { shop_id: String, patch: ShopPatch },
    AddDress(String),
    ToggleDress(DressRef),
    AskDeleteDress(DressRef),
    ConfirmDeleteDress,
    CancelDeleteDress,
    ChangeDress { target: DressRef, change: DressChange },
    OpenSketch(DressRef),
    DownloadSketch(DressRef),
    ExportReport,
}

/// What the controller still has to do after the state was updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    Render,
    Commit,
    OpenSketch(DressRef),
    DownloadSketch(DressRef),
    ExportReport,
}

fn dress_ref(attr: &dyn Fn(&str) -> Option<String>) -> Option<DressRef> {
    Some(DressRef {
        shop_id: attr("data-shop")?,
        dress_id: attr("data-dress")?,
    })
}

/// Decodes a `data-action` / `data-input` name plus its element attributes.
/// `value` is the form value for inputs and selects.
pub fn parse_action(
    name: &str,
    attr: &dyn Fn(&str) -> Option<String>,
    value: Option<String>,
) -> Option<UiAction> {
    let change = |change: DressChange| {
        Some(UiAction::ChangeDress {
            target: dress_ref(attr)?,
            change,
        })
    };
    let patch = |patch: ShopPatch| {
        Some(UiAction::PatchShop {
            shop_id: attr("data-shop")?,
            patch,
        })
    };
    match name {
        "tab" => attr("data-tab").map(|key| UiAction::SelectTab(Tab::from_key(&key))),
        "show-shop-form" => Some(UiAction::ShowShopForm),
        "cancel-shop-form" => Some(UiAction::CancelShopForm),
        "submit-shop-form" => Some(UiAction::SubmitShopForm),
        "draft-name" => value.map(UiAction::DraftName),
        "draft-description" => value.map(UiAction::DraftDescription),
        "draft-color" => attr("data-value").map(UiAction::DraftColor),
        "draft-emoji" => attr("data-value").map(UiAction::DraftEmoji),
        "edit-shop" => attr("data-shop").map(UiAction::EditShop),
        "finish-edit-shop" => Some(UiAction::FinishEditShop),
        "delete-shop" => attr("data-shop").map(UiAction::DeleteShop),
        "shop-name" => patch(ShopPatch {
            name: Some(value?),
            ..ShopPatch::default()
        }),
        "shop-description" => patch(ShopPatch {
            description: Some(value?),
            ..ShopPatch::default()
        }),
        "add-dress" => attr("data-shop").map(UiAction::AddDress),
        "toggle-dress" => dress_ref(attr).map(UiAction::ToggleDress),
        "ask-delete-dress" => dress_ref(attr).map(UiAction::AskDeleteDress),
        "confirm-delete-dress" => Some(UiAction::ConfirmDeleteDress),
        "cancel-delete-dress" => Some(UiAction::CancelDeleteDress),
        "dress-name" => change(DressChange::Name(value?)),
        "dress-memo" => change(DressChange::Memo(value?)),
        "dress-price" => {
            let value = value?;
            let tier = if value.is_empty() {
                None
            } else {
                Some(PriceTier::from_label(&value)?)
            };
            change(DressChange::PriceRange(tier))
        }
        "dress-detail" => {
            let field = DetailField::from_key(&attr("data-field")?).ok()?;
            let detail = field.choose(&attr("data-value")?).ok()?;
            change(DressChange::Detail(detail))
        }
        "dress-extra-amount" => change(DressChange::Detail(Detail::ExtraCostAmount(value?))),
        "dress-score" => {
            let category = ScoreCategory::from_key(&attr("data-category")?).ok()?;
            let score = Score::new(attr("data-value")?.parse().ok()?).ok()?;
            change(DressChange::Score(category, score))
        }
        "open-sketch" => dress_ref(attr).map(UiAction::OpenSketch),
        "download-sketch" => dress_ref(attr).map(UiAction::DownloadSketch),
        "export-report" => Some(UiAction::ExportReport),
        _ => None,
    }
}

/// Applies one UI action. Catalog edits go through `Catalog::apply`; the
/// rest only touches view state.
pub fn update(
    state: &mut State,
    action: UiAction,
    new_shop_id: impl FnOnce() -> String,
) -> Result<Effect, CatalogError> {
    let edit = match action {
        UiAction::Unlock(code) => {
            match check_access(&code) {
                Ok(()) => {
                    state.unlocked = true;
                    state.gate_error = None;
                }
                Err(err) => state.gate_error = Some(err.to_string()),
            }
            return Ok(Effect::Render);
        }
        UiAction::SelectTab(tab) => {
            state.tab = tab;
            return Ok(Effect::Render);
        }
        UiAction::ShowShopForm => {
            state.adding_shop = true;
            return Ok(Effect::Render);
        }
        UiAction::CancelShopForm => {
            state.reset_draft();
            return Ok(Effect::Render);
        }
        UiAction::DraftName(name) => {
            state.draft.name = name;
            if !state.draft.name.trim().is_empty() {
                state.draft_error = None;
            }
            return Ok(Effect::Nothing);
        }
        UiAction::DraftDescription(description) => {
            state.draft.description = description;
            return Ok(Effect::Nothing);
        }
        UiAction::DraftColor(color) => {
            state.draft.color = color;
            return Ok(Effect::Render);
        }
        UiAction::DraftEmoji(emoji) => {
            state.draft.emoji = emoji;
            return Ok(Effect::Render);
        }
        UiAction::EditShop(shop_id) => {
            state.editing_shop = Some(shop_id);
            return Ok(Effect::Render);
        }
        UiAction::FinishEditShop => {
            state.editing_shop = None;
            return Ok(Effect::Render);
        }
        UiAction::ToggleDress(target) => {
            if !state.expanded.remove(&target) {
                state.expanded.insert(target);
            }
            return Ok(Effect::Render);
        }
        UiAction::AskDeleteDress(target) => {
            state.confirm_delete = Some(target);
            return Ok(Effect::Render);
        }
        UiAction::CancelDeleteDress => {
            state.confirm_delete = None;
            return Ok(Effect::Render);
        }
        UiAction::OpenSketch(target) => return Ok(Effect::OpenSketch(target)),
        UiAction::DownloadSketch(target) => return Ok(Effect::DownloadSketch(target)),
        UiAction::ExportReport => {
            return Ok(if state.catalog.is_empty() {
                Effect::Nothing
            } else {
                Effect::ExportReport
            });
        }
        UiAction::SubmitShopForm => {
            if state.draft.name.trim().is_empty() {
                state.draft_error = Some(CatalogError::BlankShopName.to_string());
                return Ok(Effect::Render);
            }
            Edit::AddShop {
                id: new_shop_id(),
                draft: state.draft.clone(),
            }
        }
        UiAction::DeleteShop(shop_id) => Edit::DeleteShop { shop_id },
        UiAction::PatchShop { shop_id, patch } => Edit::UpdateShop { shop_id, patch },
        UiAction::AddDress(shop_id) => Edit::AddDress { shop_id },
        UiAction::ConfirmDeleteDress => {
            let Some(target) = state.confirm_delete.take() else {
                return Ok(Effect::Render);
            };
            Edit::DeleteDress {
                shop_id: target.shop_id,
                dress_id: target.dress_id,
            }
        }
        UiAction::ChangeDress { target, change } => Edit::UpdateDress {
            shop_id: target.shop_id,
            dress_id: target.dress_id,
            change,
        },
    };
    let adding = matches!(edit, Edit::AddShop { .. });
    let next = state.catalog.apply(edit)?;
    state.commit(next);
    if adding {
        state.reset_draft();
    }
    Ok(Effect::Commit)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use dresstour_shared::model::SkirtStyle;
    use dresstour_shared::scoring::total_score;
    use dresstour_shared::Catalog;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn unlocked() -> State {
        let mut state = State::new(Catalog::seed(), true);
        state.unlocked = true;
        state
    }

    fn no_id() -> String {
        unreachable!("no shop should be created")
    }

    #[test]
    fn gate_rejects_wrong_code() {
        let mut state = State::new(Catalog::seed(), false);
        let effect = update(&mut state, UiAction::Unlock("1234".into()), no_id).unwrap();
        assert_eq!(effect, Effect::Render);
        assert!(!state.unlocked);
        assert_eq!(state.gate_error.as_deref(), Some("잘못된 비밀번호입니다."));

        update(&mut state, UiAction::Unlock("0520".into()), no_id).unwrap();
        assert!(state.unlocked);
        assert_eq!(state.gate_error, None);
    }

    #[test]
    fn parses_score_buttons() {
        let attr = attrs(&[
            ("data-shop", "meraki"),
            ("data-dress", "meraki_dress1"),
            ("data-category", "comfort"),
            ("data-value", "4"),
        ]);
        let action = parse_action("dress-score", &attr, None).unwrap();
        assert_eq!(
            action,
            UiAction::ChangeDress {
                target: DressRef::new("meraki", "meraki_dress1"),
                change: DressChange::Score(ScoreCategory::Comfort, Score::new(4).unwrap()),
            }
        );
    }

    #[test]
    fn rejects_out_of_set_values() {
        let bad_score = attrs(&[
            ("data-shop", "meraki"),
            ("data-dress", "meraki_dress1"),
            ("data-category", "comfort"),
            ("data-value", "7"),
        ]);
        assert_eq!(parse_action("dress-score", &bad_score, None), None);

        let bad_detail = attrs(&[
            ("data-shop", "meraki"),
            ("data-dress", "meraki_dress1"),
            ("data-field", "skirt"),
            ("data-value", "미니"),
        ]);
        assert_eq!(parse_action("dress-detail", &bad_detail, None), None);
        assert_eq!(parse_action("launch", &attrs(&[]), None), None);
    }

    #[test]
    fn price_select_clears_on_empty_value() {
        let attr = attrs(&[("data-shop", "meraki"), ("data-dress", "meraki_dress1")]);
        assert_eq!(
            parse_action("dress-price", &attr, Some(String::new())),
            Some(UiAction::ChangeDress {
                target: DressRef::new("meraki", "meraki_dress1"),
                change: DressChange::PriceRange(None),
            })
        );
        assert_eq!(
            parse_action("dress-price", &attr, Some("고급라인".into())),
            Some(UiAction::ChangeDress {
                target: DressRef::new("meraki", "meraki_dress1"),
                change: DressChange::PriceRange(Some(PriceTier::High)),
            })
        );
    }

    #[test]
    fn detail_choice_commits_to_catalog() {
        let mut state = unlocked();
        let attr = attrs(&[
            ("data-shop", "edeline"),
            ("data-dress", "edeline_dress3"),
            ("data-field", "skirt"),
            ("data-value", "머메이드"),
        ]);
        let action = parse_action("dress-detail", &attr, None).unwrap();
        assert_eq!(update(&mut state, action, no_id), Ok(Effect::Commit));
        let dress = state.catalog.dress("edeline", "edeline_dress3").unwrap();
        assert_eq!(dress.details.skirt, Some(SkirtStyle::Mermaid));
    }

    #[test]
    fn blank_draft_is_rejected_with_a_message() {
        let mut state = unlocked();
        state.adding_shop = true;
        update(&mut state, UiAction::DraftName("   ".into()), no_id).unwrap();
        assert_eq!(
            update(&mut state, UiAction::SubmitShopForm, no_id),
            Ok(Effect::Render)
        );
        assert_eq!(state.catalog.shops().len(), 2);
        assert!(state.adding_shop);
        assert_eq!(
            state.draft_error.as_deref(),
            Some("업체명을 입력해주세요.")
        );

        assert_eq!(
            update(&mut state, UiAction::DraftName("로즈".into()), no_id),
            Ok(Effect::Nothing)
        );
        assert_eq!(state.draft_error, None);
    }

    #[test]
    fn submitting_draft_adds_shop_and_resets_form() {
        let mut state = unlocked();
        update(&mut state, UiAction::ShowShopForm, no_id).unwrap();
        update(&mut state, UiAction::DraftName("로즈".into()), no_id).unwrap();
        update(&mut state, UiAction::DraftEmoji("💐".into()), no_id).unwrap();
        let effect = update(&mut state, UiAction::SubmitShopForm, || "shop_1".into()).unwrap();
        assert_eq!(effect, Effect::Commit);
        let shop = state.catalog.shop("shop_1").unwrap();
        assert_eq!(shop.name, "로즈");
        assert_eq!(shop.emoji, "💐");
        assert_eq!(shop.dresses.len(), 4);
        assert!(!state.adding_shop);
        assert!(state.draft.name.is_empty());
    }

    #[test]
    fn delete_dress_needs_confirmation() {
        let mut state = unlocked();
        let target = DressRef::new("meraki", "meraki_dress1");
        assert_eq!(
            update(&mut state, UiAction::ConfirmDeleteDress, no_id),
            Ok(Effect::Render)
        );
        assert_eq!(state.catalog.shop("meraki").unwrap().dresses.len(), 4);

        update(&mut state, UiAction::AskDeleteDress(target.clone()), no_id).unwrap();
        update(&mut state, UiAction::ConfirmDeleteDress, no_id).unwrap();
        assert!(state.catalog.dress("meraki", "meraki_dress1").is_none());
        assert_eq!(state.confirm_delete, None);
    }

    #[test]
    fn scoring_updates_total() {
        let mut state = unlocked();
        let target = DressRef::new("meraki", "meraki_dress2");
        for (category, value) in [(ScoreCategory::Overall, 5), (ScoreCategory::Comfort, 3)] {
            let action = UiAction::ChangeDress {
                target: target.clone(),
                change: DressChange::Score(category, Score::new(value).unwrap()),
            };
            update(&mut state, action, no_id).unwrap();
        }
        let dress = state.catalog.dress("meraki", "meraki_dress2").unwrap();
        assert_eq!(total_score(dress), 8);
    }

    #[test]
    fn unknown_dress_is_an_error() {
        let mut state = unlocked();
        let action = UiAction::ChangeDress {
            target: DressRef::new("meraki", "ghost"),
            change: DressChange::Memo("x".into()),
        };
        assert!(matches!(
            update(&mut state, action, no_id),
            Err(CatalogError::UnknownDress { .. })
        ));
    }

    #[test]
    fn toggling_expands_then_collapses() {
        let mut state = unlocked();
        let target = DressRef::new("meraki", "meraki_dress1");
        update(&mut state, UiAction::ToggleDress(target.clone()), no_id).unwrap();
        assert!(state.is_expanded(&target));
        update(&mut state, UiAction::ToggleDress(target.clone()), no_id).unwrap();
        assert!(!state.is_expanded(&target));
    }

    #[test]
    fn export_is_skipped_for_empty_catalog() {
        let mut state = State::new(Catalog::default(), false);
        assert_eq!(
            update(&mut state, UiAction::ExportReport, no_id),
            Ok(Effect::Nothing)
        );
    }
}
