//! Minecraft chat components, as found in the status `description` field.
//!
//! See [Chat](https://wiki.vg/Text_formatting#Text_components). Servers send
//! either a bare JSON string (legacy MOTDs, often with `§` formatting codes)
//! or a component object. Both decode into the same [`ChatComponent`].

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor, value::MapAccessDeserializer},
};

/// A rich text node. Children in `extra` inherit the style of their parent
/// when rendered by a client; only the structure is kept here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatComponent {
    pub text: String,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underlined: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    /// Randomly switches between characters of the same width.
    #[serde(skip_serializing_if = "is_false")]
    pub obfuscated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<ChatComponent>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl ChatComponent {
    /// The component's own text, without its children.
    #[must_use]
    pub const fn text(&self) -> &str {
        self.text.as_str()
    }
}

impl From<String> for ChatComponent {
    fn from(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }
}

impl From<&str> for ChatComponent {
    fn from(text: &str) -> Self {
        text.to_owned().into()
    }
}

/// Plain text of the whole tree: own text, then each child depth first.
impl fmt::Display for ChatComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        for child in &self.extra {
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

/// The object form, field for field.
#[derive(Deserialize)]
struct ComponentObject {
    #[serde(default)]
    text: String,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
    #[serde(default)]
    strikethrough: bool,
    #[serde(default)]
    obfuscated: bool,
    #[serde(default)]
    color: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    extra: Vec<ChatComponent>,
}

/// Reads `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl From<ComponentObject> for ChatComponent {
    fn from(object: ComponentObject) -> Self {
        Self {
            text: object.text,
            bold: object.bold,
            italic: object.italic,
            underlined: object.underlined,
            strikethrough: object.strikethrough,
            obfuscated: object.obfuscated,
            color: object.color,
            extra: object.extra,
        }
    }
}

// Dispatches on the first token of the value: a string becomes a text-only
// component, a map is decoded as a component object. `extra` entries go
// through the same rule.
struct ChatVisitor;

impl<'de> Visitor<'de> for ChatVisitor {
    type Value = ChatComponent;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a chat component object")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.into())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(value.into())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ChatComponent::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        ComponentObject::deserialize(MapAccessDeserializer::new(map)).map(Into::into)
    }
}

impl<'de> Deserialize<'de> for ChatComponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ChatVisitor)
    }
}
