//! Writer for `.qxi` input profile documents.
//!
//! The wire shapes live in private mirror structs so the serde layout stays
//! an implementation detail of this module.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{ChannelKind, InputChannel, InputProfile, MovementType, ProfileKind, WriteError};

/// Wire shape of one `<Channel>` element. Field order is emission order;
/// `None` children disappear entirely, which keeps a default configuration
/// minimal on disk.
#[derive(Serialize)]
#[serde(rename = "Channel")]
struct ChannelXml<'a> {
    #[serde(rename = "@Number")]
    number: u32,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Type")]
    kind: ChannelKind,
    #[serde(rename = "ExtraPress", skip_serializing_if = "Option::is_none")]
    extra_press: Option<&'static str>,
    #[serde(rename = "Movement", skip_serializing_if = "Option::is_none")]
    movement: Option<MovementXml>,
    #[serde(rename = "Feedbacks", skip_serializing_if = "Option::is_none")]
    feedbacks: Option<FeedbacksXml>,
}

#[derive(Serialize)]
struct MovementXml {
    #[serde(rename = "@Sensitivity")]
    sensitivity: i32,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    marker: Option<MovementType>,
}

#[derive(Serialize)]
struct FeedbacksXml {
    #[serde(rename = "@LowerValue", skip_serializing_if = "Option::is_none")]
    lower: Option<u8>,
    #[serde(rename = "@UpperValue", skip_serializing_if = "Option::is_none")]
    upper: Option<u8>,
}

impl<'a> ChannelXml<'a> {
    fn new(channel: &'a InputChannel, number: u32) -> Self {
        ChannelXml {
            number,
            name: channel.name(),
            kind: channel.kind(),
            extra_press: channel.send_extra_press().then_some("True"),
            movement: movement_for(channel),
            feedbacks: feedbacks_for(channel),
        }
    }
}

/// Movement is written for explicitly relative sliders and knobs, and for
/// encoders, whose movement is relative by nature and carries no marker
/// text.
fn movement_for(channel: &InputChannel) -> Option<MovementXml> {
    match channel.kind() {
        ChannelKind::Slider | ChannelKind::Knob
            if channel.movement_type() == MovementType::Relative =>
        {
            Some(MovementXml {
                sensitivity: channel.movement_sensitivity(),
                marker: Some(MovementType::Relative),
            })
        }
        ChannelKind::Encoder => Some(MovementXml {
            sensitivity: channel.movement_sensitivity(),
            marker: None,
        }),
        _ => None,
    }
}

/// Feedbacks are written for buttons only, and only the bounds that differ
/// from the full 0 to 255 range.
fn feedbacks_for(channel: &InputChannel) -> Option<FeedbacksXml> {
    if channel.kind() != ChannelKind::Button {
        return None;
    }
    let lower = (channel.lower_value() != 0).then_some(channel.lower_value());
    let upper = (channel.upper_value() != u8::MAX).then_some(channel.upper_value());
    if lower.is_none() && upper.is_none() {
        return None;
    }
    Some(FeedbacksXml { lower, upper })
}

impl InputChannel {
    /// Writes this channel as one `<Channel>` element under the given
    /// channel number.
    pub fn to_xml(&self, number: u32) -> Result<String, WriteError> {
        Ok(quick_xml::se::to_string(&ChannelXml::new(self, number))?)
    }
}

/// Wire shape of a whole `.qxi` document.
#[derive(Serialize)]
#[serde(rename = "InputProfile")]
struct ProfileXml<'a> {
    #[serde(rename = "Creator")]
    creator: CreatorXml,
    #[serde(rename = "Manufacturer")]
    manufacturer: &'a str,
    #[serde(rename = "Model")]
    model: &'a str,
    #[serde(rename = "Type")]
    kind: ProfileKind,
    #[serde(rename = "Channel")]
    channels: Vec<ChannelXml<'a>>,
}

#[derive(Serialize)]
struct CreatorXml {
    #[serde(rename = "Name")]
    name: &'static str,
    #[serde(rename = "Version")]
    version: &'static str,
}

impl CreatorXml {
    fn current() -> Self {
        CreatorXml {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl<'a> ProfileXml<'a> {
    fn new(profile: &'a InputProfile) -> Self {
        ProfileXml {
            creator: CreatorXml::current(),
            manufacturer: profile.manufacturer(),
            model: profile.model(),
            kind: profile.kind(),
            channels: profile
                .channels()
                .iter()
                .map(|(number, channel)| ChannelXml::new(channel, *number))
                .collect(),
        }
    }
}

impl InputProfile {
    /// Writes the whole profile as a `.qxi` document string.
    ///
    /// Channels are written in ascending number order. The `Creator` block
    /// names this library; a writer stamps its own identity rather than
    /// carrying over the one it loaded.
    pub fn to_xml(&self) -> Result<String, WriteError> {
        let mut document: String = concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            "\n",
            "<!DOCTYPE InputProfile>",
            "\n"
        )
        .into();
        quick_xml::se::to_writer(&mut document, &ProfileXml::new(self))?;
        Ok(document)
    }

    /// Writes the `.qxi` document to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), WriteError> {
        writer.write_all(self.to_xml()?.as_bytes())?;
        Ok(())
    }

    /// Writes the `.qxi` document to a file, replacing an existing one.
    pub fn save(&self, path: &Path) -> Result<(), WriteError> {
        self.write_to(File::create(path)?)
    }
}
