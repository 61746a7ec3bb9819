use crate::catalog::Catalog;
use crate::model::{Dress, Score, ScoreCategory, Shop};

pub const MAX_TOTAL: u32 = (ScoreCategory::ALL.len() as u32) * (Score::MAX as u32);

pub fn total_score(dress: &Dress) -> u32 {
    dress.scores.total()
}

/// A dress together with the shop it belongs to.
#[derive(Clone, Copy, Debug)]
pub struct RankedDress<'a> {
    pub shop: &'a Shop,
    pub dress: &'a Dress,
    pub total: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ShopStats<'a> {
    pub shop: &'a Shop,
    pub average: f64,
    pub scored: usize,
}

/// Scored dresses across every shop, best first. Ties keep shop order, then dress order.
pub fn top_dresses(catalog: &Catalog, limit: usize) -> Vec<RankedDress<'_>> {
    let mut ranked: Vec<RankedDress<'_>> = catalog
        .shops()
        .iter()
        .flat_map(|shop| {
            shop.dresses
                .iter()
                .filter(|dress| dress.scores.is_scored())
                .map(move |dress| RankedDress {
                    shop,
                    dress,
                    total: total_score(dress),
                })
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(limit);
    ranked
}

pub fn shop_average(shop: &Shop) -> (f64, usize) {
    let totals: Vec<u32> = shop
        .dresses
        .iter()
        .filter(|dress| dress.scores.is_scored())
        .map(total_score)
        .collect();
    if totals.is_empty() {
        return (0.0, 0);
    }
    let mean = f64::from(totals.iter().sum::<u32>()) / totals.len() as f64;
    (round_one_decimal(mean), totals.len())
}

pub fn shop_stats(catalog: &Catalog) -> Vec<ShopStats<'_>> {
    let mut stats: Vec<ShopStats<'_>> = catalog
        .shops()
        .iter()
        .map(|shop| {
            let (average, scored) = shop_average(shop);
            ShopStats {
                shop,
                average,
                scored,
            }
        })
        .collect();
    stats.sort_by(|a, b| b.average.total_cmp(&a.average));
    stats
}

pub fn average_winner<'a, 'b>(stats: &'b [ShopStats<'a>]) -> Option<&'b ShopStats<'a>> {
    stats.first().filter(|first| first.average > 0.0)
}

pub fn best_dress(shop: &Shop) -> Option<&Dress> {
    shop.dresses
        .iter()
        .filter(|dress| dress.scores.is_scored())
        .fold(None, |best: Option<&Dress>, dress| match best {
            Some(current) if total_score(current) >= total_score(dress) => Some(current),
            _ => Some(dress),
        })
}

/// Formats an average the way the summary and the report print it.
pub fn format_average(average: f64) -> String {
    format!("{average:.1}")
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DressChange, Edit};
    use proptest::prelude::*;

    fn scored(catalog: Catalog, shop_id: &str, dress_id: &str, values: &[u8]) -> Catalog {
        values
            .iter()
            .zip(ScoreCategory::ALL)
            .fold(catalog, |catalog, (value, category)| {
                catalog
                    .apply(Edit::UpdateDress {
                        shop_id: shop_id.into(),
                        dress_id: dress_id.into(),
                        change: DressChange::Score(category, Score::new(*value).unwrap()),
                    })
                    .unwrap()
            })
    }

    #[test]
    fn max_total_is_thirty() {
        assert_eq!(MAX_TOTAL, 30);
    }

    #[test]
    fn fully_scored_dress_totals_twenty_eight() {
        let catalog = scored(Catalog::seed(), "meraki", "meraki_dress1", &[5, 4, 5, 5, 4, 5]);
        let dress = catalog.dress("meraki", "meraki_dress1").unwrap();
        assert_eq!(total_score(dress), 28);
    }

    #[test]
    fn unscored_dresses_are_left_out_of_rankings() {
        let catalog = Catalog::seed();
        assert!(top_dresses(&catalog, 3).is_empty());
        assert!(best_dress(catalog.shop("meraki").unwrap()).is_none());
        let stats = shop_stats(&catalog);
        assert!(stats.iter().all(|entry| entry.average == 0.0 && entry.scored == 0));
        assert!(average_winner(&stats).is_none());
    }

    #[test]
    fn higher_average_shop_wins() {
        let catalog = Catalog::seed();
        let catalog = scored(catalog, "meraki", "meraki_dress1", &[4, 4, 4, 4, 4, 4]);
        let catalog = scored(catalog, "meraki", "meraki_dress2", &[4, 4, 4, 4, 4, 4]);
        let catalog = scored(catalog, "edeline", "edeline_dress1", &[5, 5, 5, 5]);
        let stats = shop_stats(&catalog);
        assert_eq!(stats[0].shop.id, "meraki");
        assert_eq!(stats[0].average, 24.0);
        assert_eq!(stats[0].scored, 2);
        assert_eq!(stats[1].average, 20.0);
        assert_eq!(average_winner(&stats).map(|s| s.shop.id.as_str()), Some("meraki"));
    }

    #[test]
    fn averages_round_to_one_decimal() {
        let catalog = scored(Catalog::seed(), "meraki", "meraki_dress1", &[5, 5]);
        let catalog = scored(catalog, "meraki", "meraki_dress2", &[3, 3]);
        let catalog = scored(catalog, "meraki", "meraki_dress3", &[3, 3]);
        let (average, scored) = shop_average(catalog.shop("meraki").unwrap());
        assert_eq!(scored, 3);
        assert_eq!(average, 7.3);
        assert_eq!(format_average(average), "7.3");
        assert_eq!(format_average(24.0), "24.0");
    }

    #[test]
    fn ties_keep_encounter_order() {
        let catalog = scored(Catalog::seed(), "edeline", "edeline_dress2", &[3]);
        let catalog = scored(catalog, "meraki", "meraki_dress3", &[3]);
        let catalog = scored(catalog, "meraki", "meraki_dress4", &[5]);
        let ids: Vec<&str> = top_dresses(&catalog, 3)
            .iter()
            .map(|entry| entry.dress.id.as_str())
            .collect();
        assert_eq!(ids, ["meraki_dress4", "meraki_dress3", "edeline_dress2"]);
    }

    #[test]
    fn best_dress_prefers_first_on_tie() {
        let catalog = scored(Catalog::seed(), "meraki", "meraki_dress2", &[4]);
        let catalog = scored(catalog, "meraki", "meraki_dress3", &[4]);
        let best = best_dress(catalog.shop("meraki").unwrap()).unwrap();
        assert_eq!(best.id, "meraki_dress2");
    }

    proptest! {
        #[test]
        fn totals_sum_scores_and_stay_bounded(values in proptest::collection::vec(1u8..=5, 0..=6)) {
            let catalog = scored(Catalog::seed(), "meraki", "meraki_dress1", &values);
            let dress = catalog.dress("meraki", "meraki_dress1").unwrap();
            let expected: u32 = values.iter().map(|value| u32::from(*value)).sum();
            prop_assert_eq!(total_score(dress), expected);
            prop_assert!(total_score(dress) <= MAX_TOTAL);
        }

        #[test]
        fn ranking_is_sorted_and_truncated(
            assignments in proptest::collection::vec((0usize..8, 1u8..=5, 0usize..6), 0..24)
        ) {
            let mut catalog = Catalog::seed();
            for (slot, value, category) in assignments {
                let shop_id = if slot < 4 { "meraki" } else { "edeline" };
                let dress_id = format!("{shop_id}_dress{}", slot % 4 + 1);
                catalog = catalog
                    .apply(Edit::UpdateDress {
                        shop_id: shop_id.into(),
                        dress_id,
                        change: DressChange::Score(
                            ScoreCategory::ALL[category],
                            Score::new(value).unwrap(),
                        ),
                    })
                    .unwrap();
            }
            let ranked = top_dresses(&catalog, 3);
            let scored_count = catalog
                .shops()
                .iter()
                .flat_map(|shop| shop.dresses.iter())
                .filter(|dress| dress.scores.is_scored())
                .count();
            prop_assert_eq!(ranked.len(), scored_count.min(3));
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].total >= pair[1].total);
            }
        }
    }
}
