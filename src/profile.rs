use std::collections::{btree_map::Entry, BTreeMap};

use getset::{CopyGetters, Getters, Setters};
use serde_with::SerializeDisplay;
use thiserror::Error;

use crate::InputChannel;

/// Transport a profile speaks, as named in its `<Type>` element.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString, SerializeDisplay,
)]
pub enum ProfileKind {
    #[default]
    #[strum(to_string = "MIDI")]
    Midi,
    #[strum(to_string = "OS2L")]
    Os2l,
    #[strum(to_string = "OSC")]
    Osc,
    #[strum(to_string = "HID")]
    Hid,
    #[strum(to_string = "DMX")]
    Dmx,
    #[strum(to_string = "Enttec")]
    Enttec,
    #[strum(to_string = "Gamepad")]
    Gamepad,
}

/// Errors in the checked channel map mutators.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("channel number {0} is already mapped")]
    DuplicateChannelNumber(u32),
    #[error("channel number {0} is not mapped")]
    UnknownChannelNumber(u32),
}

/// One device's complete mapping: metadata plus channels keyed by channel
/// number.
///
/// Numbers are map keys rather than record fields, so iteration and
/// serialization follow ascending number order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, CopyGetters, Setters)]
pub struct InputProfile {
    #[getset(get = "pub", set = "pub")]
    manufacturer: String,
    #[getset(get = "pub", set = "pub")]
    model: String,
    #[getset(get_copy = "pub", set = "pub")]
    kind: ProfileKind,
    #[getset(get = "pub")]
    channels: BTreeMap<u32, InputChannel>,
}

impl InputProfile {
    /// Display name, manufacturer and model joined with a space.
    pub fn name(&self) -> String {
        format!("{} {}", self.manufacturer, self.model)
    }

    /// Maps `channel` under `number`.
    ///
    /// A number holds at most one channel; mapping a taken number fails and
    /// leaves the existing channel in place.
    pub fn insert_channel(
        &mut self,
        number: u32,
        channel: InputChannel,
    ) -> Result<(), ProfileError> {
        match self.channels.entry(number) {
            Entry::Occupied(_) => Err(ProfileError::DuplicateChannelNumber(number)),
            Entry::Vacant(entry) => {
                entry.insert(channel);
                Ok(())
            }
        }
    }

    /// Removes and returns the channel mapped under `number`.
    pub fn remove_channel(&mut self, number: u32) -> Option<InputChannel> {
        self.channels.remove(&number)
    }

    /// Moves the channel mapped under `from` to the free number `to`.
    pub fn remap_channel(&mut self, from: u32, to: u32) -> Result<(), ProfileError> {
        if from != to && self.channels.contains_key(&to) {
            return Err(ProfileError::DuplicateChannelNumber(to));
        }
        let channel = self
            .channels
            .remove(&from)
            .ok_or(ProfileError::UnknownChannelNumber(from))?;
        self.channels.insert(to, channel);
        Ok(())
    }

    pub fn channel(&self, number: u32) -> Option<&InputChannel> {
        self.channels.get(&number)
    }

    pub fn channel_mut(&mut self, number: u32) -> Option<&mut InputChannel> {
        self.channels.get_mut(&number)
    }
}
