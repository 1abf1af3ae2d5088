//! Builder for FetchXML, the query language of the record store.

use std::fmt::{Display, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
}

impl Operator {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub attribute: String,
    pub operator: Operator,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntity {
    pub name: String,
    pub from: String,
    pub to: String,
    pub alias: String,
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    entity: String,
    attributes: Vec<String>,
    conditions: Vec<Condition>,
    links: Vec<LinkEntity>,
}

impl FetchQuery {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            attributes: Vec::new(),
            conditions: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes.extend(attributes.into_iter().map(Into::into));
        self
    }

    pub fn condition(
        mut self,
        attribute: impl Into<String>,
        operator: Operator,
        value: impl Display,
    ) -> Self {
        self.conditions.push(Condition {
            attribute: attribute.into(),
            operator,
            value: value.to_string(),
        });
        self
    }

    pub fn link(mut self, link: LinkEntity) -> Self {
        self.links.push(link);
        self
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn links(&self) -> &[LinkEntity] {
        &self.links
    }
}

impl Display for FetchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut xml = String::new();
        write!(xml, "<fetch><entity name=\"{}\">", escape(&self.entity))?;

        for attribute in &self.attributes {
            write!(xml, "<attribute name=\"{}\" />", escape(attribute))?;
        }

        if !self.conditions.is_empty() {
            xml.push_str("<filter>");
            for condition in &self.conditions {
                write!(
                    xml,
                    "<condition attribute=\"{}\" operator=\"{}\" value=\"{}\" />",
                    escape(&condition.attribute),
                    condition.operator.as_str(),
                    escape(&condition.value)
                )?;
            }
            xml.push_str("</filter>");
        }

        for link in &self.links {
            write!(
                xml,
                "<link-entity name=\"{}\" from=\"{}\" to=\"{}\" alias=\"{}\">",
                escape(&link.name),
                escape(&link.from),
                escape(&link.to),
                escape(&link.alias)
            )?;
            for attribute in &link.attributes {
                write!(xml, "<attribute name=\"{}\" />", escape(attribute))?;
            }
            xml.push_str("</link-entity>");
        }

        xml.push_str("</entity></fetch>");
        f.write_str(&xml)
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_filters_and_links() {
        let query = FetchQuery::new("account")
            .attributes(["name", "accountid"])
            .condition("statecode", Operator::Eq, 0)
            .link(LinkEntity {
                name: "systemuser".into(),
                from: "systemuserid".into(),
                to: "ownerid".into(),
                alias: "owner".into(),
                attributes: vec!["fullname".into()],
            });

        assert_eq!(
            query.to_string(),
            "<fetch><entity name=\"account\">\
             <attribute name=\"name\" /><attribute name=\"accountid\" />\
             <filter><condition attribute=\"statecode\" operator=\"eq\" value=\"0\" /></filter>\
             <link-entity name=\"systemuser\" from=\"systemuserid\" to=\"ownerid\" alias=\"owner\">\
             <attribute name=\"fullname\" /></link-entity>\
             </entity></fetch>"
        );
    }

    #[test]
    fn omits_empty_filter() {
        assert_eq!(
            FetchQuery::new("contact").to_string(),
            "<fetch><entity name=\"contact\"></entity></fetch>"
        );
    }

    #[test]
    fn escapes_values() {
        let query = FetchQuery::new("contact").condition("name", Operator::Eq, "a\"<b>&'c");
        assert!(query
            .to_string()
            .contains("value=\"a&quot;&lt;b&gt;&amp;&apos;c\""));
    }
}
