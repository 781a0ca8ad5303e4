use derivative::Derivative;
use getset::{CopyGetters, Getters, Setters};
use serde_with::SerializeDisplay;

/// What a mapped control is. The kind decides how incoming values are
/// interpreted and which extra configuration is persisted for the channel.
///
/// The strum tokens are the wire vocabulary of `.qxi` files and must not
/// change.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, SerializeDisplay,
)]
pub enum ChannelKind {
    #[default]
    #[strum(to_string = "Button")]
    Button,
    #[strum(to_string = "Knob")]
    Knob,
    #[strum(to_string = "Encoder")]
    Encoder,
    #[strum(to_string = "Slider")]
    Slider,
    #[strum(to_string = "Next Page")]
    NextPage,
    #[strum(to_string = "Previous Page")]
    PrevPage,
    #[strum(to_string = "Page Set")]
    PageSet,
    /// Sentinel for tokens outside the vocabulary, so files from newer or
    /// vendor-extended writers still load.
    #[strum(to_string = "None")]
    NoKind,
}

impl ChannelKind {
    /// Looks up a kind by its serialized token. Matching is exact; anything
    /// else degrades to [`ChannelKind::NoKind`].
    pub fn from_token(token: &str) -> Self {
        token.parse().unwrap_or(ChannelKind::NoKind)
    }

    /// The kinds a user can assign to a channel, in the order channel editors
    /// present them. This order is a UI contract and intentionally differs
    /// from declaration order.
    pub fn selectable() -> [ChannelKind; 7] {
        [
            ChannelKind::Slider,
            ChannelKind::Knob,
            ChannelKind::Encoder,
            ChannelKind::Button,
            ChannelKind::NextPage,
            ChannelKind::PrevPage,
            ChannelKind::PageSet,
        ]
    }

    /// File name of the icon for this kind, or `None` for
    /// [`ChannelKind::NoKind`]. Encoders reuse the knob icon.
    pub fn icon_resource(self, format: IconFormat) -> Option<String> {
        let base = match self {
            ChannelKind::Button => "button",
            ChannelKind::Knob | ChannelKind::Encoder => "knob",
            ChannelKind::Slider => "slider",
            ChannelKind::NextPage => "back",
            ChannelKind::PrevPage => "forward",
            ChannelKind::PageSet => "star",
            ChannelKind::NoKind => return None,
        };
        Some(format!("{base}.{format}"))
    }
}

/// Icon flavor for [`ChannelKind::icon_resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum IconFormat {
    #[strum(to_string = "svg")]
    Svg,
    #[strum(to_string = "png")]
    Png,
}

/// Whether a continuous control reports absolute positions or relative
/// deltas.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, SerializeDisplay,
)]
pub enum MovementType {
    #[default]
    #[strum(to_string = "Absolute")]
    Absolute,
    #[strum(to_string = "Relative")]
    Relative,
}

/// Configuration of one physical control within an input profile.
///
/// The channel number is not part of the record; the owning
/// [`InputProfile`](crate::InputProfile) keys channels by number.
#[derive(Debug, Clone, PartialEq, Eq, Derivative, Getters, CopyGetters, Setters)]
#[derivative(Default)]
pub struct InputChannel {
    #[getset(get = "pub", set = "pub")]
    name: String,
    #[getset(get_copy = "pub")]
    kind: ChannelKind,
    #[getset(get_copy = "pub", set = "pub")]
    movement_type: MovementType,
    /// Scaling factor for relative movement. Meaningful for sliders, knobs
    /// and encoders only, but kept for every kind.
    #[derivative(Default(value = "20"))]
    #[getset(get_copy = "pub", set = "pub")]
    movement_sensitivity: i32,
    /// Buttons on some hardware fire a second press event instead of a
    /// release; this flag tells consumers to expect it.
    #[getset(get_copy = "pub", set = "pub")]
    send_extra_press: bool,
    #[getset(get_copy = "pub")]
    lower_value: u8,
    #[derivative(Default(value = "u8::MAX"))]
    #[getset(get_copy = "pub")]
    upper_value: u8,
}

impl InputChannel {
    /// Changes the kind and applies the coupled sensitivity default: 1 for
    /// encoders, 20 for everything else.
    ///
    /// Only this setter touches the sensitivity. A later call to
    /// [`set_movement_sensitivity`](Self::set_movement_sensitivity)
    /// overrides the default.
    pub fn set_kind(&mut self, kind: ChannelKind) -> &mut Self {
        self.kind = kind;
        self.movement_sensitivity = if kind == ChannelKind::Encoder { 1 } else { 20 };
        self
    }

    /// Sets both feedback bounds as one pair. `lower <= upper` is expected
    /// but not enforced.
    pub fn set_range(&mut self, lower: u8, upper: u8) -> &mut Self {
        self.lower_value = lower;
        self.upper_value = upper;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let channel = InputChannel::default();
        assert_eq!(channel.name(), "");
        assert_eq!(channel.kind(), ChannelKind::Button);
        assert_eq!(channel.movement_type(), MovementType::Absolute);
        assert_eq!(channel.movement_sensitivity(), 20);
        assert!(!channel.send_extra_press());
        assert_eq!(channel.lower_value(), 0);
        assert_eq!(channel.upper_value(), 255);
    }

    #[test]
    fn kind_setter_couples_sensitivity() {
        let mut channel = InputChannel::default();
        channel.set_movement_sensitivity(77);

        channel.set_kind(ChannelKind::Encoder);
        assert_eq!(channel.movement_sensitivity(), 1);

        channel.set_kind(ChannelKind::Slider);
        assert_eq!(channel.movement_sensitivity(), 20);

        channel.set_kind(ChannelKind::NoKind);
        assert_eq!(channel.movement_sensitivity(), 20);

        // the plain sensitivity setter wins over the coupled default
        channel.set_kind(ChannelKind::Encoder);
        channel.set_movement_sensitivity(5);
        assert_eq!(channel.movement_sensitivity(), 5);
    }

    #[test]
    fn tokens_round_trip_for_every_kind() {
        for kind in ChannelKind::selectable() {
            assert_eq!(ChannelKind::from_token(&kind.to_string()), kind);
        }
        assert_eq!(
            ChannelKind::from_token(&ChannelKind::NoKind.to_string()),
            ChannelKind::NoKind
        );
    }

    #[test]
    fn unknown_tokens_degrade_to_no_kind() {
        assert_eq!(ChannelKind::from_token("Jogwheel"), ChannelKind::NoKind);
        assert_eq!(ChannelKind::from_token("button"), ChannelKind::NoKind);
        assert_eq!(ChannelKind::from_token("NextPage"), ChannelKind::NoKind);
        assert_eq!(ChannelKind::from_token(""), ChannelKind::NoKind);
    }

    #[test]
    fn editor_order_is_fixed() {
        let tokens: Vec<String> = ChannelKind::selectable()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            tokens,
            [
                "Slider",
                "Knob",
                "Encoder",
                "Button",
                "Next Page",
                "Previous Page",
                "Page Set"
            ]
        );
    }

    #[test]
    fn icon_table() {
        assert_eq!(
            ChannelKind::Button.icon_resource(IconFormat::Png),
            Some("button.png".into())
        );
        assert_eq!(
            ChannelKind::Encoder.icon_resource(IconFormat::Svg),
            ChannelKind::Knob.icon_resource(IconFormat::Svg)
        );
        assert_eq!(
            ChannelKind::Encoder.icon_resource(IconFormat::Svg),
            Some("knob.svg".into())
        );
        assert_eq!(
            ChannelKind::NextPage.icon_resource(IconFormat::Svg),
            Some("back.svg".into())
        );
        assert_eq!(
            ChannelKind::PrevPage.icon_resource(IconFormat::Png),
            Some("forward.png".into())
        );
        assert_eq!(
            ChannelKind::PageSet.icon_resource(IconFormat::Svg),
            Some("star.svg".into())
        );
        assert_eq!(ChannelKind::NoKind.icon_resource(IconFormat::Svg), None);
        assert_eq!(ChannelKind::NoKind.icon_resource(IconFormat::Png), None);
    }

    #[test]
    fn set_range_updates_both_bounds() {
        let mut channel = InputChannel::default();
        channel.set_range(10, 127);
        assert_eq!(channel.lower_value(), 10);
        assert_eq!(channel.upper_value(), 127);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = InputChannel::default();
        original.set_name("Crossfader".into());
        original.set_kind(ChannelKind::Slider);
        original.set_movement_type(MovementType::Relative);
        original.set_movement_sensitivity(5);

        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_name("Jog".into());
        copy.set_kind(ChannelKind::Encoder);
        assert_eq!(original.name(), "Crossfader");
        assert_eq!(original.kind(), ChannelKind::Slider);
        assert_eq!(original.movement_sensitivity(), 5);
    }
}
