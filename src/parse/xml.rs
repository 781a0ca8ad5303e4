use std::any::type_name;

use std::str::FromStr;

use roxmltree::Node;

use crate::{Problem, ProblemAt};

pub(crate) trait GetXmlAttribute {
    fn required_attribute(&self, attr: &str) -> Result<&str, ProblemAt>;

    fn parse_required_attribute<T: FromStr>(&self, attr: &str) -> Result<T, ProblemAt>
    where
        <T as FromStr>::Err: std::error::Error + 'static;

    fn parse_attribute<T: FromStr>(&self, attr: &str) -> Option<Result<T, ProblemAt>>
    where
        <T as FromStr>::Err: std::error::Error + 'static;
}

impl GetXmlAttribute for Node<'_, '_> {
    /// Returns the value of an attribute, or a problem if missing.
    fn required_attribute(&self, attr: &str) -> Result<&str, ProblemAt> {
        self.attribute(attr).ok_or_else(|| {
            Problem::XmlAttributeMissing {
                attr: attr.to_owned(),
                tag: self.tag_name().name().to_owned(),
            }
            .at(self)
        })
    }

    /// Parse an XML attribute to the type `T`.
    ///
    /// If the attribute is missing or can't be parsed to `T`, a problem is
    /// returned.
    fn parse_required_attribute<T: FromStr>(&self, attr: &str) -> Result<T, ProblemAt>
    where
        <T as FromStr>::Err: std::error::Error + 'static,
    {
        let content = self.required_attribute(attr)?;
        parse_attribute_content(self, content, attr)
    }

    /// Parse an optional XML attribute to the type `T`. If it is missing,
    /// returns None.
    fn parse_attribute<T: FromStr>(&self, attr: &str) -> Option<Result<T, ProblemAt>>
    where
        <T as FromStr>::Err: std::error::Error + 'static,
    {
        let content = self.attribute(attr)?;
        Some(parse_attribute_content(self, content, attr))
    }
}

fn parse_attribute_content<T: FromStr>(
    node: &Node,
    content: &str,
    attr: &str,
) -> Result<T, ProblemAt>
where
    <T as FromStr>::Err: std::error::Error + 'static,
{
    content.parse::<T>().map_err(|err| {
        Problem::InvalidAttribute {
            attr: attr.to_owned(),
            tag: node.tag_name().name().to_owned(),
            content: content.to_owned(),
            source: Box::new(err),
            expected_type: type_name::<T>().to_owned(),
        }
        .at(node)
    })
}
