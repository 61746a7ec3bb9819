use dresstour_shared::brush::Jitter;
use dresstour_shared::report::ReportDate;

fn random_u32() -> u32 {
    (js_sys::Math::random() * (u32::MAX as f64 + 1.0)) as u32
}

pub fn make_shop_id() -> String {
    let now = js_sys::Date::now() as u64;
    format!("shop_{now}_{:08x}", random_u32())
}

/// Sparkle placement backed by `Math.random`.
pub struct BrowserJitter;

impl Jitter for BrowserJitter {
    fn sample(&mut self) -> f64 {
        js_sys::Math::random()
    }
}

pub fn today() -> ReportDate {
    let now = js_sys::Date::new_0();
    ReportDate {
        year: now.get_full_year(),
        month: now.get_month() + 1,
        day: now.get_date(),
    }
}
