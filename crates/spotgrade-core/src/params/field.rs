//! The fixed namespace of per-spot adjustment fields.
//!
//! Every slider, checkbox and combo box of the local-adjustment panel is one
//! [`FieldId`]. Each id carries its group and [`FieldKind`] (range, options,
//! default), so reconciliation code is written once over "a field" rather
//! than once per adjustment group.

use serde::{Deserialize, Serialize};

/// Adjustment group a field belongs to. Each group except
/// [`FieldGroup::General`] has an enable toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    General,
    ColorLight,
    Exposure,
    Vibrance,
    Blur,
    ToneMap,
    Retinex,
    Sharpening,
    ContrastByDetail,
    Denoise,
}

impl FieldGroup {
    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::ColorLight => "Color & Light",
            Self::Exposure => "Exposure",
            Self::Vibrance => "Vibrance",
            Self::Blur => "Blur & Noise",
            Self::ToneMap => "Tone Mapping",
            Self::Retinex => "Retinex",
            Self::Sharpening => "Sharpening",
            Self::ContrastByDetail => "Contrast by Detail Levels",
            Self::Denoise => "Denoise",
        }
    }

    /// The toggle field that enables this group, if it has one.
    pub const fn toggle(&self) -> Option<FieldId> {
        match self {
            Self::General => None,
            Self::ColorLight => Some(FieldId::ExpColor),
            Self::Exposure => Some(FieldId::ExpExpose),
            Self::Vibrance => Some(FieldId::ExpVibrance),
            Self::Blur => Some(FieldId::ExpBlur),
            Self::ToneMap => Some(FieldId::ExpTonemap),
            Self::Retinex => Some(FieldId::ExpReti),
            Self::Sharpening => Some(FieldId::ExpSharp),
            Self::ContrastByDetail => Some(FieldId::ExpCbdl),
            Self::Denoise => Some(FieldId::ExpDenoi),
        }
    }
}

/// Value domain and default of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Slider value in `min..=max`.
    Number { min: f64, max: f64, default: f64 },
    /// Checkbox.
    Toggle { default: bool },
    /// Combo box; the value is an index into `options`.
    Choice {
        options: &'static [&'static str],
        default: u8,
    },
}

const fn number(min: f64, max: f64, default: f64) -> FieldKind {
    FieldKind::Number { min, max, default }
}

const fn toggle(default: bool) -> FieldKind {
    FieldKind::Toggle { default }
}

const fn choice(options: &'static [&'static str], default: u8) -> FieldKind {
    FieldKind::Choice { options, default }
}

impl FieldKind {
    /// Default value for this kind.
    pub fn default_value(&self) -> FieldValue {
        match *self {
            Self::Number { default, .. } => FieldValue::Number(default),
            Self::Toggle { default } => FieldValue::Toggle(default),
            Self::Choice { default, .. } => FieldValue::Choice(default),
        }
    }

    /// Whether `value` has the variant this kind stores.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (Self::Number { .. }, FieldValue::Number(_))
                | (Self::Toggle { .. }, FieldValue::Toggle(_))
                | (Self::Choice { .. }, FieldValue::Choice(_))
        )
    }

    /// Bring `value` into range. Numbers are clamped (NaN falls back to the
    /// default), choice indices past the option list snap to the last
    /// option, and values of the wrong variant become the default.
    pub fn trim(&self, value: FieldValue) -> FieldValue {
        match (*self, value) {
            (Self::Number { min, max, default }, FieldValue::Number(v)) => {
                if v.is_nan() {
                    FieldValue::Number(default)
                } else {
                    FieldValue::Number(v.clamp(min, max))
                }
            }
            (Self::Toggle { .. }, FieldValue::Toggle(b)) => FieldValue::Toggle(b),
            (Self::Choice { options, .. }, FieldValue::Choice(i)) => {
                let last = options.len().saturating_sub(1) as u8;
                FieldValue::Choice(i.min(last))
            }
            _ => self.default_value(),
        }
    }
}

/// A single field value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Number(f64),
    Toggle(bool),
    Choice(u8),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            Self::Toggle(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<u8> {
        match self {
            Self::Choice(i) => Some(*i),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Toggle(b) => write!(f, "{b}"),
            Self::Choice(i) => write!(f, "#{i}"),
        }
    }
}

macro_rules! field_table {
    ($( $(#[$doc:meta])* $id:ident => $group:ident, $kind:expr; )*) => {
        /// Identifier of one adjustment field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum FieldId {
            $( $(#[$doc])* $id, )*
        }

        impl FieldId {
            /// Every field, in table order.
            pub const ALL: &'static [FieldId] = &[ $( FieldId::$id, )* ];

            /// Group the field belongs to.
            pub const fn group(self) -> FieldGroup {
                match self {
                    $( FieldId::$id => FieldGroup::$group, )*
                }
            }

            /// Value domain and default.
            pub const fn kind(self) -> FieldKind {
                match self {
                    $( FieldId::$id => $kind, )*
                }
            }
        }
    };
}

const QUALITY_CURVE: &[&str] = &["none", "std"];
const BLUR_METHOD: &[&str] = &["norm", "inv", "sym"];
const RETINEX_METHOD: &[&str] = &["low", "uni", "high"];

field_table! {
    /// Keep colour shifts out of the adjusted area.
    Avoid => General, toggle(false);

    ExpColor => ColorLight, toggle(false);
    /// Use the lightness/chroma curves instead of the sliders.
    Curvactiv => ColorLight, toggle(false);
    Lightness => ColorLight, number(-100.0, 100.0, 0.0);
    Contrast => ColorLight, number(-100.0, 100.0, 0.0);
    Chroma => ColorLight, number(-100.0, 150.0, 0.0);
    /// Scope (colour sensitivity) of the colour & light adjustment.
    Sensi => ColorLight, number(0.0, 100.0, 19.0);
    QualityCurveMethod => ColorLight, choice(QUALITY_CURVE, 0);
    /// Apply outside the spot instead of inside.
    Invers => ColorLight, toggle(false);

    ExpExpose => Exposure, toggle(false);
    Expcomp => Exposure, number(-2.0, 4.0, 0.0);
    Hlcompr => Exposure, number(0.0, 500.0, 20.0);
    Hlcomprthresh => Exposure, number(0.0, 100.0, 33.0);
    Black => Exposure, number(-16384.0, 32768.0, 0.0);
    Shcompr => Exposure, number(0.0, 100.0, 50.0);
    Warm => Exposure, number(-100.0, 100.0, 0.0);
    Sensiex => Exposure, number(0.0, 100.0, 19.0);

    ExpVibrance => Vibrance, toggle(false);
    Saturated => Vibrance, number(-100.0, 100.0, 0.0);
    Pastels => Vibrance, number(-100.0, 100.0, 0.0);
    /// Lower bound of the pastel/saturated threshold.
    PsThresholdLow => Vibrance, number(0.0, 100.0, 0.0);
    /// Upper bound of the pastel/saturated threshold.
    PsThresholdHigh => Vibrance, number(0.0, 100.0, 75.0);
    ProtectSkins => Vibrance, toggle(false);
    AvoidColorShift => Vibrance, toggle(true);
    /// Link pastel and saturated sliders.
    PastSatTog => Vibrance, toggle(true);
    Sensiv => Vibrance, number(0.0, 100.0, 19.0);

    ExpBlur => Blur, toggle(false);
    BlurRadius => Blur, number(1.0, 100.0, 1.0);
    Strength => Blur, number(0.0, 100.0, 0.0);
    Sensibn => Blur, number(0.0, 100.0, 40.0);
    BlurMethod => Blur, choice(BLUR_METHOD, 0);
    /// Blur luminance only.
    ActivLum => Blur, toggle(false);

    ExpTonemap => ToneMap, toggle(false);
    Stren => ToneMap, number(-0.5, 2.0, 1.0);
    Gamma => ToneMap, number(0.4, 4.0, 1.0);
    Estop => ToneMap, number(0.1, 4.0, 1.4);
    Scaltm => ToneMap, number(0.1, 10.0, 10.0);
    Rewei => ToneMap, number(0.0, 9.0, 0.0);
    Sensitm => ToneMap, number(0.0, 100.0, 19.0);

    ExpReti => Retinex, toggle(false);
    Str => Retinex, number(0.0, 100.0, 0.0);
    Chrrt => Retinex, number(0.0, 100.0, 0.0);
    Neigh => Retinex, number(14.0, 150.0, 50.0);
    Vart => Retinex, number(50.0, 500.0, 200.0);
    Sensih => Retinex, number(0.0, 100.0, 19.0);
    RetinexMethod => Retinex, choice(RETINEX_METHOD, 2);
    InversRet => Retinex, toggle(false);

    ExpSharp => Sharpening, toggle(false);
    SharRadius => Sharpening, number(0.42, 3.5, 0.75);
    SharAmount => Sharpening, number(0.0, 100.0, 75.0);
    SharDamping => Sharpening, number(0.0, 100.0, 75.0);
    SharIter => Sharpening, number(1.0, 100.0, 30.0);
    SensiSha => Sharpening, number(0.0, 100.0, 19.0);
    InversSha => Sharpening, toggle(false);

    ExpCbdl => ContrastByDetail, toggle(false);
    /// Finest detail level.
    Multiplier0 => ContrastByDetail, number(0.0, 400.0, 100.0);
    Multiplier1 => ContrastByDetail, number(0.0, 400.0, 100.0);
    Multiplier2 => ContrastByDetail, number(0.0, 400.0, 100.0);
    Multiplier3 => ContrastByDetail, number(0.0, 400.0, 100.0);
    /// Coarsest detail level.
    Multiplier4 => ContrastByDetail, number(0.0, 400.0, 100.0);
    ChromaCbdl => ContrastByDetail, number(0.0, 300.0, 0.0);
    Threshold => ContrastByDetail, number(0.0, 100.0, 20.0);
    Sensicb => ContrastByDetail, number(0.0, 100.0, 19.0);

    ExpDenoi => Denoise, toggle(false);
    NoiseLumF => Denoise, number(0.0, 100.0, 0.0);
    NoiseLumC => Denoise, number(0.0, 100.0, 0.0);
    NoiseLumDetail => Denoise, number(0.0, 100.0, 0.0);
    NoiseLEqual => Denoise, number(-2.0, 10.0, 7.0);
    NoiseChroF => Denoise, number(0.0, 100.0, 0.0);
    NoiseChroC => Denoise, number(0.0, 100.0, 0.0);
    NoiseChroDetail => Denoise, number(0.0, 100.0, 0.0);
    AdjBlur => Denoise, number(-100.0, 100.0, 0.0);
    Bilateral => Denoise, number(0.0, 100.0, 0.0);
    SensiDen => Denoise, number(0.0, 100.0, 30.0);
}

/// One press of the contrast-by-detail luma buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LumaContrast {
    /// Lower every level, the finest one the most.
    Minus,
    /// Put every level back at 100.
    Neutral,
    /// Raise every level, the finest one the most.
    Plus,
}

impl LumaContrast {
    /// Neutral multiplier of a detail level.
    pub const NEUTRAL: f64 = 100.0;

    /// New multiplier of detail `level` (0 is finest) given its `current`
    /// value. Plus and minus move level `i` by `5 - i`.
    pub fn step(self, level: usize, current: f64) -> f64 {
        let inc = (FieldId::CONTRAST_LEVELS.len() - level) as f64;
        match self {
            Self::Minus => current - inc,
            Self::Neutral => Self::NEUTRAL,
            Self::Plus => current + inc,
        }
    }
}

/// Number of fields in the namespace.
pub const FIELD_COUNT: usize = FieldId::ALL.len();

impl FieldId {
    /// Contrast-by-detail multipliers, finest level first.
    pub const CONTRAST_LEVELS: [FieldId; 5] = [
        FieldId::Multiplier0,
        FieldId::Multiplier1,
        FieldId::Multiplier2,
        FieldId::Multiplier3,
        FieldId::Multiplier4,
    ];

    /// Position of this field in [`FieldId::ALL`] and in a `ParamTable`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this field is the enable toggle of its own group.
    pub fn is_group_toggle(self) -> bool {
        self.group().toggle() == Some(self)
    }

    /// Fields belonging to `group`, in table order.
    pub fn in_group(group: FieldGroup) -> impl Iterator<Item = FieldId> {
        Self::ALL.iter().copied().filter(move |f| f.group() == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_table_order() {
        for (i, field) in FieldId::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_every_toggle_is_a_toggle_field_in_its_group() {
        for field in FieldId::ALL {
            if let Some(toggle) = field.group().toggle() {
                assert_eq!(toggle.group(), field.group());
                assert!(matches!(toggle.kind(), FieldKind::Toggle { .. }));
            }
        }
        assert!(FieldId::ExpColor.is_group_toggle());
        assert!(!FieldId::Sensi.is_group_toggle());
    }

    #[test]
    fn test_defaults_are_within_range() {
        for field in FieldId::ALL {
            let kind = field.kind();
            let default = kind.default_value();
            assert_eq!(kind.trim(default), default, "{field:?} default out of range");
        }
    }

    #[test]
    fn test_trim_clamps_and_snaps() {
        let sensi = FieldId::Sensi.kind();
        assert_eq!(sensi.trim(FieldValue::Number(250.0)), FieldValue::Number(100.0));
        assert_eq!(sensi.trim(FieldValue::Number(f64::NAN)), FieldValue::Number(19.0));
        assert_eq!(sensi.trim(FieldValue::Toggle(true)), FieldValue::Number(19.0));

        let method = FieldId::BlurMethod.kind();
        assert_eq!(method.trim(FieldValue::Choice(9)), FieldValue::Choice(2));
    }

    #[test]
    fn test_in_group_lists_multipliers() {
        let levels: Vec<_> = FieldId::in_group(FieldGroup::ContrastByDetail)
            .filter(|f| matches!(f.kind(), FieldKind::Number { max, .. } if max == 400.0))
            .collect();
        assert_eq!(levels, FieldId::CONTRAST_LEVELS);
    }

    #[test]
    fn test_luma_contrast_steps_finest_level_most() {
        assert_eq!(LumaContrast::Plus.step(0, 100.0), 105.0);
        assert_eq!(LumaContrast::Plus.step(4, 100.0), 101.0);
        assert_eq!(LumaContrast::Minus.step(0, 100.0), 95.0);
        assert_eq!(LumaContrast::Minus.step(4, 100.0), 99.0);
        assert_eq!(LumaContrast::Neutral.step(2, 250.0), 100.0);
    }
}
