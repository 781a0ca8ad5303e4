//! Lenient reader for `.qxi` input profile documents.
//!
//! Reading fails only on unparseable XML or a wrong root element. Everything
//! below that is recovered from with a documented default and recorded in
//! [`Problems`].

pub(crate) mod xml;

use std::{fs::File, io::Read, path::Path};

use roxmltree::Node;

use crate::{
    parse::xml::GetXmlAttribute, ChannelKind, HandleProblem, InputChannel, InputProfile,
    MovementType, ParseError, Problem, Problems, ProfileKind,
};

/// An input profile read from a document, together with every recoverable
/// anomaly encountered on the way.
#[derive(Debug, Default)]
pub struct ParsedProfile {
    pub profile: InputProfile,
    pub problems: Problems,
}

/// Reads an input profile document from a string.
pub fn parse_profile(document: &str) -> Result<ParsedProfile, ParseError> {
    let doc = parse_document(document)?;
    let root = doc
        .descendants()
        .find(|n| n.has_tag_name("InputProfile"))
        .ok_or(ParseError::NoRootNode)?;

    let mut parsed = ParsedProfile::default();
    parsed.parse_profile_root(root);

    Ok(parsed)
}

impl ParsedProfile {
    /// Reads an input profile document from a reader.
    pub fn from_reader<T: Read>(mut reader: T) -> Result<Self, ParseError> {
        let mut document = String::new();
        reader
            .read_to_string(&mut document)
            .map_err(ParseError::Read)?;
        parse_profile(&document)
    }

    /// Reads an input profile from a `.qxi` file.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let file = File::open(path).map_err(|e| ParseError::Open(path.into(), e))?;
        Self::from_reader(file)
    }

    fn parse_profile_root(&mut self, root: Node) {
        for child in root.children().filter(|n| n.is_element()) {
            match child.tag_name().name() {
                // Creator describes the program that wrote the file, not the
                // profile; it is stamped fresh on save.
                "Creator" => (),
                "Manufacturer" => {
                    self.profile
                        .set_manufacturer(child.text().unwrap_or_default().to_owned());
                }
                "Model" => {
                    self.profile
                        .set_model(child.text().unwrap_or_default().to_owned());
                }
                "Type" => self.parse_profile_kind(child),
                "Channel" => self.parse_channel(child),
                other => {
                    Problem::UnexpectedXmlNode(other.to_owned())
                        .at(&child)
                        .handled_by("ignoring node", &mut self.problems);
                }
            }
        }
    }

    fn parse_profile_kind(&mut self, node: Node) {
        let token = node.text().unwrap_or_default();
        match token.parse::<ProfileKind>() {
            Ok(kind) => {
                self.profile.set_kind(kind);
            }
            Err(_) => {
                Problem::UnknownProfileKind(token.to_owned())
                    .at(&node)
                    .handled_by("assuming MIDI", &mut self.problems);
            }
        }
    }

    fn parse_channel(&mut self, node: Node) {
        let number = match node
            .parse_required_attribute::<u32>("Number")
            .ok_or_handled_by("skipping channel", &mut self.problems)
        {
            Some(number) => number,
            None => return,
        };
        let channel = read_channel(node, &mut self.problems);
        if self.profile.insert_channel(number, channel).is_err() {
            Problem::DuplicateChannelNumber(number)
                .at(&node)
                .handled_by("keeping the first definition", &mut self.problems);
        }
    }
}

impl InputChannel {
    /// Reads one channel definition from a `<Channel>` element.
    ///
    /// Any other element is refused with
    /// [`ParseError::UnexpectedElement`] and produces no record. Inside the
    /// element, children are applied in document order and every anomaly is
    /// recovered from.
    pub fn parse(xml: &str, problems: &mut Problems) -> Result<Self, ParseError> {
        let doc = parse_document(xml)?;
        Self::from_node(doc.root_element(), problems)
    }

    pub(crate) fn from_node(node: Node, problems: &mut Problems) -> Result<Self, ParseError> {
        if !node.has_tag_name("Channel") {
            return Err(ParseError::UnexpectedElement {
                expected: "Channel".to_owned(),
                found: node.tag_name().name().to_owned(),
            });
        }
        Ok(read_channel(node, problems))
    }
}

// `.qxi` files carry a `<!DOCTYPE InputProfile>` line, which roxmltree
// refuses unless DTDs are allowed
fn parse_document(text: &str) -> Result<roxmltree::Document<'_>, roxmltree::Error> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(text, options)
}

fn read_channel(node: Node, problems: &mut Problems) -> InputChannel {
    let mut channel = InputChannel::default();
    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "Name" => {
                channel.set_name(child.text().unwrap_or_default().to_owned());
            }
            "Type" => read_kind(child, &mut channel, problems),
            // a presence marker, the element text does not matter
            "ExtraPress" => {
                channel.set_send_extra_press(true);
            }
            "Movement" => read_movement(child, &mut channel, problems),
            "Feedbacks" => read_feedbacks(child, &mut channel, problems),
            other => {
                Problem::UnexpectedXmlNode(other.to_owned())
                    .at(&child)
                    .handled_by("ignoring node", problems);
            }
        }
    }
    channel
}

fn read_kind(node: Node, channel: &mut InputChannel, problems: &mut Problems) {
    let token = node.text().unwrap_or_default();
    match token.parse::<ChannelKind>() {
        Ok(kind) => {
            channel.set_kind(kind);
        }
        Err(_) => {
            Problem::UnknownChannelKind(token.to_owned())
                .at(&node)
                .handled_by("mapping to the 'None' kind", problems);
            channel.set_kind(ChannelKind::NoKind);
        }
    }
}

fn read_movement(node: Node, channel: &mut InputChannel, problems: &mut Problems) {
    if let Some(result) = node.parse_attribute::<i32>("Sensitivity") {
        let sensitivity = result.ok_or_handled_by("using 0", problems).unwrap_or(0);
        channel.set_movement_sensitivity(sensitivity);
    }
    // only the literal "Relative" marker sets a movement; any other text
    // leaves the current value alone
    if let Some(Ok(MovementType::Relative)) = node.text().map(str::parse::<MovementType>) {
        channel.set_movement_type(MovementType::Relative);
    }
}

fn read_feedbacks(node: Node, channel: &mut InputChannel, problems: &mut Problems) {
    let lower = node
        .parse_attribute::<u32>("LowerValue")
        .and_then(|r| r.ok_or_handled_by("using 0", problems))
        .map_or(0, saturate);
    let upper = node
        .parse_attribute::<u32>("UpperValue")
        .and_then(|r| r.ok_or_handled_by("using 255", problems))
        .map_or(u8::MAX, saturate);
    channel.set_range(lower, upper);
}

/// Feedback bounds beyond the 8 bit range clamp to 255.
fn saturate(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
