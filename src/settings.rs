//! Party settings
//!
//! Defaults match the classic page. A few can be overridden from the page
//! query string (`?threshold=35&confetti=off`), which is handy for noisy rooms.

use std::borrow::Cow;

use url::form_urlencoded;

use crate::CanvasSize;
use crate::consts::*;

/// Seed used when the host does not provide one
pub const DEFAULT_SEED: u64 = 0x00C4_4E1E;

/// Tunables for one party
#[derive(Debug, Clone)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Pointer ===
    /// Hit window half extents around a candle anchor
    pub hit_half_width: f32,
    pub hit_half_height: f32,
    /// Vertical correction applied to pointer input
    pub pointer_y_offset: f32,

    // === Microphone ===
    /// Mean frequency magnitude (0-255) that counts as a blow
    pub blow_threshold: f32,

    // === Confetti ===
    pub confetti: bool,
    pub confetti_count: usize,
    /// RNG seed for confetti layout
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            hit_half_width: HIT_HALF_WIDTH,
            hit_half_height: HIT_HALF_HEIGHT,
            pointer_y_offset: POINTER_Y_OFFSET,

            blow_threshold: BLOW_THRESHOLD,

            confetti: true,
            confetti_count: CONFETTI_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

/// Decoded `key=value` pairs of a query string (leading `?` optional).
/// Percent escapes and `+` are decoded the way `URLSearchParams` does.
pub fn query_pairs(search: &str) -> impl Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

impl Settings {
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Defaults with query-string overrides applied. Bad values are logged and skipped.
    pub fn from_query(search: &str) -> Self {
        let mut settings = Self::default();
        settings.apply_query(search);
        settings
    }

    pub fn apply_query(&mut self, search: &str) {
        for (key, value) in query_pairs(search) {
            let applied = match &*key {
                "threshold" => value
                    .parse::<f32>()
                    .ok()
                    .filter(|t| (0.0..=255.0).contains(t))
                    .map(|t| self.blow_threshold = t),
                "confetti" => parse_flag(&value).map(|on| self.confetti = on),
                "confetti_count" => value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n <= 1000)
                    .map(|n| self.confetti_count = n),
                "seed" => value.parse::<u64>().ok().map(|s| self.seed = s),
                // Not a setting (e.g. the candle token)
                _ => continue,
            };
            if applied.is_none() {
                log::warn!("Ignoring invalid setting {key}={value}");
            }
        }
    }

    /// Settings for this page: query overrides, time-based seed unless one was given
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();

        let mut settings = Self::default();
        settings.seed = js_sys::Date::now() as u64;
        settings.apply_query(&search);
        log::info!(
            "Settings: threshold {}, confetti {} x{}",
            settings.blow_threshold,
            settings.confetti,
            settings.confetti_count
        );
        settings
    }

    /// Native: defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.blow_threshold, 20.0);
        assert_eq!(s.confetti_count, 100);
        assert_eq!(s.canvas_size(), CanvasSize::new(600.0, 400.0));
    }

    #[test]
    fn test_query_overrides() {
        let s = Settings::from_query("?threshold=35.5&confetti=off&confetti_count=20&seed=9");
        assert_eq!(s.blow_threshold, 35.5);
        assert!(!s.confetti);
        assert_eq!(s.confetti_count, 20);
        assert_eq!(s.seed, 9);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let s = Settings::from_query("threshold=loud&confetti=maybe&confetti_count=-3&seed=");
        let d = Settings::default();
        assert_eq!(s.blow_threshold, d.blow_threshold);
        assert_eq!(s.confetti, d.confetti);
        assert_eq!(s.confetti_count, d.confetti_count);
        assert_eq!(s.seed, d.seed);

        let s = Settings::from_query("threshold=300");
        assert_eq!(s.blow_threshold, d.blow_threshold);
    }

    #[test]
    fn test_unrelated_params_ignored() {
        let s = Settings::from_query("candles=%5B%5D&utm_source=x");
        assert_eq!(s.blow_threshold, 20.0);
    }

    #[test]
    fn test_query_pairs() {
        let pairs: Vec<(String, String)> = query_pairs("?a=1&&b&c=x=y")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected =
            [("a", "1"), ("b", ""), ("c", "x=y")].map(|(k, v)| (k.to_string(), v.to_string()));
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_query_values_are_decoded() {
        let s = Settings::from_query("?threshold=3%35&confetti=o%6Ef&seed=%31%32");
        assert_eq!(s.blow_threshold, 35.0);
        assert!(!s.confetti);
        assert_eq!(s.seed, 12);

        let pairs: Vec<_> = query_pairs("note=happy+birthday%21").collect();
        assert_eq!(pairs[0].1, "happy birthday!");
    }
}
