//! Recoverable anomalies in `.qxi` documents and the record of how each one
//! was resolved. Parsing never aborts on these; it substitutes a documented
//! default and pushes an entry here instead.

use roxmltree::{Node, TextPos};

pub type Problems = Vec<HandledProblem>;

/// A recoverable problem in an input profile document, with position
/// information and the action taken to recover from it.
#[derive(thiserror::Error, Debug)]
#[error("{p}; {action}")]
pub struct HandledProblem {
    p: ProblemAt,
    pub action: String,
}

/// A recoverable problem in an input profile document, with position
/// information.
#[derive(thiserror::Error, Debug)]
#[error("{p} (line {at})")]
pub struct ProblemAt {
    p: Problem,
    at: TextPos,
}

/// A recoverable kind of problem in an input profile document.
#[derive(thiserror::Error, Debug)]
pub enum Problem {
    #[error("missing attribute '{attr}' on <{tag}>")]
    XmlAttributeMissing { attr: String, tag: String },
    #[error(
        "could not parse attribute {attr}=\"{content}\" on <{tag}> as {expected_type}; {source}"
    )]
    InvalidAttribute {
        attr: String,
        tag: String,
        content: String,
        source: Box<dyn std::error::Error>,
        expected_type: String,
    },
    #[error("unexpected node <{0}>")]
    UnexpectedXmlNode(String),
    #[error("unknown channel type '{0}'")]
    UnknownChannelKind(String),
    #[error("unknown profile type '{0}'")]
    UnknownProfileKind(String),
    #[error("channel number {0} is already mapped")]
    DuplicateChannelNumber(u32),
}

impl Problem {
    /// Attach the position of `node` to this problem.
    pub(crate) fn at(self, node: &Node) -> ProblemAt {
        ProblemAt {
            p: self,
            at: node.document().text_pos_at(node.range().start),
        }
    }
}

impl ProblemAt {
    /// Record what was done to recover from the problem and push it onto the
    /// problems.
    pub fn handled_by<T: Into<String>>(self, action: T, problems: &mut Problems) {
        problems.push(HandledProblem {
            p: self,
            action: action.into(),
        });
    }
}

pub(crate) trait HandleProblem<T, S: Into<String>> {
    fn ok_or_handled_by(self, action: S, problems: &mut Problems) -> Option<T>;
}

impl<T, S: Into<String>> HandleProblem<T, S> for Result<T, ProblemAt> {
    /// Record what will be done to recover from a possible Err(ProblemAt),
    /// push it onto problems and return None. An Ok(v) passes through as
    /// Some(v).
    fn ok_or_handled_by(self, action: S, problems: &mut Problems) -> Option<T> {
        match self {
            Ok(t) => Some(t),
            Err(p) => {
                p.handled_by(action, problems);
                None
            }
        }
    }
}

impl HandledProblem {
    pub fn problem(&self) -> &Problem {
        &self.p.p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_action_and_position() {
        let mut problems = Problems::new();

        let binding = roxmltree::Document::parse("<Channel>\n <Wheel />\n</Channel>").unwrap();
        let node = binding
            .descendants()
            .find(|n| n.has_tag_name("Wheel"))
            .unwrap();

        Problem::UnexpectedXmlNode("Wheel".into())
            .at(&node)
            .handled_by("ignoring node", &mut problems);

        assert!(matches!(
            &problems[0],
            HandledProblem {
                action,
                p: ProblemAt {
                    at,
                    p: Problem::UnexpectedXmlNode(..)
                }
            } if action == "ignoring node" && at == &TextPos { row: 2, col: 2 }
        ))
    }
}
