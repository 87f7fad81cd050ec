//! Structural snapshots of atom trees.
//!
//! A snapshot is a plain record per atom, tagged with the atom's `type`. Fields that hold their
//! default value are left out, and unknown fields are ignored when reading.

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use box_model::mathstyle::MathstyleName;

use crate::atom::{
    Atom, AtomKind, AtomType, FontSize, OperatorInfo, PhantomKind, Style, SubsupPlacement,
};
use crate::context::LetterShapeStyle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtomJson {
    #[serde(rename = "type")]
    pub atom_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Vec<AtomJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superscript: Option<Vec<AtomJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscript: Option<Vec<AtomJson>>,
    #[serde(skip_serializing_if = "StyleJson::is_empty")]
    pub style: StyleJson,
    #[serde(skip_serializing_if = "<&bool>::not")]
    pub is_selected: bool,
    #[serde(skip_serializing_if = "<&bool>::not")]
    pub caret: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `over-under` or `adjacent`; absent means `auto`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limits: Option<String>,
    #[serde(skip_serializing_if = "<&bool>::not")]
    pub explicit_subsup_placement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_style: Option<String>,
    #[serde(skip_serializing_if = "<&bool>::not")]
    pub has_argument: bool,
    #[serde(skip_serializing_if = "<&bool>::not")]
    pub is_extensible_symbol: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub above: Option<Vec<AtomJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub below: Option<Vec<AtomJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mathstyle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSizeJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_shape_style: Option<String>,
}

impl StyleJson {
    pub fn is_empty(&self) -> bool {
        *self == StyleJson::default()
    }
}

/// A font size is either a number from 1 to 10 or `"auto"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSizeJson {
    Size(u8),
    Named(String),
}

#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    UnknownType(String),
    /// An atom of the given type has neither a value nor a body.
    MissingContent(&'static str),
    InvalidField { field: &'static str, value: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(err) => write!(f, "Invalid JSON: {err}"),
            SnapshotError::UnknownType(tag) => write!(f, "Unknown atom type \"{tag}\"."),
            SnapshotError::MissingContent(tag) => {
                write!(f, "Atom of type \"{tag}\" has neither a value nor a body.")
            }
            SnapshotError::InvalidField { field, value } => {
                write!(f, "Invalid value \"{value}\" for field \"{field}\".")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Json(err)
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, SnapshotError> {
    T::from_str(value).map_err(|_| SnapshotError::InvalidField {
        field,
        value: value.to_string(),
    })
}

type FromJson = fn(&AtomJson) -> Result<Atom, SnapshotError>;

/// Constructors by `type` tag.
static REGISTRY: phf::Map<&'static str, FromJson> = phf::phf_map! {
    "mord" => symbol_from_json as FromJson,
    "mbin" => symbol_from_json as FromJson,
    "mrel" => symbol_from_json as FromJson,
    "mopen" => symbol_from_json as FromJson,
    "mclose" => symbol_from_json as FromJson,
    "mpunct" => symbol_from_json as FromJson,
    "minner" => symbol_from_json as FromJson,
    "mop" => operator_from_json as FromJson,
    "group" => group_from_json as FromJson,
    "genfrac" => fraction_from_json as FromJson,
    "phantom" => phantom_from_json as FromJson,
};

fn list_from_json(branch: Option<&[AtomJson]>) -> Result<Option<Vec<Atom>>, SnapshotError> {
    branch
        .map(|atoms| atoms.iter().map(Atom::from_json).collect())
        .transpose()
}

fn list_to_json(atoms: &[Atom]) -> Vec<AtomJson> {
    atoms.iter().map(Atom::to_json).collect()
}

fn mathstyle_from_json(json: &AtomJson) -> Result<Option<MathstyleName>, SnapshotError> {
    json.mathstyle
        .as_deref()
        .map(|name| parse_field("mathstyle", name))
        .transpose()
}

fn symbol_from_json(json: &AtomJson) -> Result<Atom, SnapshotError> {
    let atom_type: AtomType = parse_field("type", &json.atom_type)?;
    let value = json
        .value
        .as_deref()
        .ok_or(SnapshotError::MissingContent(atom_type.as_str()))?;
    Ok(Atom::symbol(atom_type, None, value))
}

fn operator_from_json(json: &AtomJson) -> Result<Atom, SnapshotError> {
    let body = list_from_json(json.body.as_deref())?;
    if json.value.is_none() && (body.is_none() || json.is_extensible_symbol) {
        return Err(SnapshotError::MissingContent("mop"));
    }
    let info = OperatorInfo {
        variant: json.variant.clone(),
        variant_style: json.variant_style.clone(),
        has_argument: json.has_argument,
        is_extensible_symbol: json.is_extensible_symbol,
    };
    Ok(Atom {
        value: json.value.clone(),
        body,
        ..Atom::new(AtomType::Mop, AtomKind::Operator(info))
    })
}

fn group_from_json(json: &AtomJson) -> Result<Atom, SnapshotError> {
    let body = list_from_json(json.body.as_deref())?.unwrap_or_default();
    Ok(Atom::group(
        body,
        Style::default(),
        mathstyle_from_json(json)?,
    ))
}

fn fraction_from_json(json: &AtomJson) -> Result<Atom, SnapshotError> {
    let above = list_from_json(json.above.as_deref())?.unwrap_or_default();
    let below = list_from_json(json.below.as_deref())?.unwrap_or_default();
    Ok(Atom::fraction(
        json.command.as_deref().unwrap_or(r"\frac"),
        above,
        below,
        mathstyle_from_json(json)?,
    ))
}

fn phantom_from_json(json: &AtomJson) -> Result<Atom, SnapshotError> {
    let kind = match json.command.as_deref() {
        Some(r"\hphantom") => PhantomKind::HPhantom,
        Some(r"\vphantom") => PhantomKind::VPhantom,
        _ => PhantomKind::Phantom,
    };
    let body = list_from_json(json.body.as_deref())?.unwrap_or_default();
    Ok(Atom::phantom(body, kind))
}

impl From<&Style> for StyleJson {
    fn from(style: &Style) -> Self {
        StyleJson {
            color: style.color.clone(),
            background_color: style.background_color.clone(),
            font_size: style.font_size.map(|size| match size {
                FontSize::Auto => FontSizeJson::Named("auto".to_string()),
                FontSize::Size(size) => FontSizeJson::Size(size),
            }),
            letter_shape_style: style
                .letter_shape_style
                .map(|shape| <&str>::from(shape).to_string()),
        }
    }
}

impl TryFrom<&StyleJson> for Style {
    type Error = SnapshotError;

    fn try_from(json: &StyleJson) -> Result<Self, Self::Error> {
        let font_size = match &json.font_size {
            None => None,
            Some(FontSizeJson::Size(size @ 1..=10)) => Some(FontSize::Size(*size)),
            Some(FontSizeJson::Named(name)) if name == "auto" => Some(FontSize::Auto),
            Some(FontSizeJson::Size(size)) => {
                return Err(SnapshotError::InvalidField {
                    field: "fontSize",
                    value: size.to_string(),
                });
            }
            Some(FontSizeJson::Named(name)) => {
                return Err(SnapshotError::InvalidField {
                    field: "fontSize",
                    value: name.clone(),
                });
            }
        };
        let letter_shape_style = json
            .letter_shape_style
            .as_deref()
            .map(|shape| parse_field::<LetterShapeStyle>("letterShapeStyle", shape))
            .transpose()?;
        Ok(Style {
            color: json.color.clone(),
            background_color: json.background_color.clone(),
            font_size,
            letter_shape_style,
        })
    }
}

impl Atom {
    /// A structural snapshot of this atom and its children.
    pub fn to_json(&self) -> AtomJson {
        let mut json = AtomJson {
            atom_type: self.atom_type.as_str().to_string(),
            command: self.command.clone(),
            value: self.value.clone(),
            body: self.body.as_deref().map(list_to_json),
            superscript: self.superscript.as_deref().map(list_to_json),
            subscript: self.subscript.as_deref().map(list_to_json),
            style: StyleJson::from(&self.style),
            is_selected: self.is_selected,
            caret: self.caret,
            id: self.id.clone(),
            limits: (self.subsup_placement != SubsupPlacement::Auto)
                .then(|| <&str>::from(self.subsup_placement).to_string()),
            explicit_subsup_placement: self.explicit_subsup_placement,
            ..Default::default()
        };
        match &self.kind {
            AtomKind::Symbol | AtomKind::Phantom(_) => {}
            AtomKind::Operator(info) => {
                json.variant = info.variant.clone();
                json.variant_style = info.variant_style.clone();
                json.has_argument = info.has_argument;
                json.is_extensible_symbol = info.is_extensible_symbol;
            }
            AtomKind::Group { mathstyle } => {
                json.mathstyle = mathstyle.map(|name| name.as_str().to_string());
            }
            AtomKind::Fraction {
                above,
                below,
                mathstyle,
            } => {
                json.above = Some(list_to_json(above));
                json.below = Some(list_to_json(below));
                json.mathstyle = mathstyle.map(|name| name.as_str().to_string());
            }
        }
        json
    }

    /// Rebuild an atom from its snapshot, dispatching on the `type` tag.
    pub fn from_json(json: &AtomJson) -> Result<Atom, SnapshotError> {
        let Some(from_json) = REGISTRY.get(json.atom_type.as_str()) else {
            return Err(SnapshotError::UnknownType(json.atom_type.clone()));
        };
        let mut atom = from_json(json)?;
        atom.command.clone_from(&json.command);
        atom.superscript = list_from_json(json.superscript.as_deref())?;
        atom.subscript = list_from_json(json.subscript.as_deref())?;
        atom.style = Style::try_from(&json.style)?;
        atom.is_selected = json.is_selected;
        atom.caret = json.caret;
        atom.id.clone_from(&json.id);
        if let Some(limits) = &json.limits {
            atom.subsup_placement = parse_field("limits", limits)?;
        }
        atom.explicit_subsup_placement = json.explicit_subsup_placement;
        Ok(atom)
    }
}

/// Write a list of atoms as a JSON array.
pub fn to_json_string(atoms: &[Atom]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(&list_to_json(atoms))?)
}

/// Read a list of atoms from a JSON array.
pub fn from_json_str(json: &str) -> Result<Vec<Atom>, SnapshotError> {
    let records: Vec<AtomJson> = serde_json::from_str(json)?;
    records.iter().map(Atom::from_json).collect()
}

#[cfg(test)]
mod tests {
    use insta::assert_json_snapshot;

    use super::*;
    use crate::parser::Parser;

    fn parse(input: &str) -> Vec<Atom> {
        Parser::new(input).and_then(Parser::parse).unwrap()
    }

    fn round_trip(atoms: &[Atom]) -> Vec<Atom> {
        from_json_str(&to_json_string(atoms).unwrap()).unwrap()
    }

    #[test]
    fn defaults_are_omitted() {
        let atoms = parse("x^2");
        assert_json_snapshot!(atoms[0].to_json(), @r#"
        {
          "type": "mord",
          "value": "x",
          "superscript": [
            {
              "type": "mord",
              "value": "2"
            }
          ]
        }
        "#);
    }

    #[test]
    fn operator_fields() {
        let atoms = parse(r"\int\limits_0^1");
        assert_json_snapshot!(atoms[0].to_json(), @r#"
        {
          "type": "mop",
          "command": "\\int",
          "value": "∫",
          "superscript": [
            {
              "type": "mord",
              "value": "1"
            }
          ],
          "subscript": [
            {
              "type": "mord",
              "value": "0"
            }
          ],
          "limits": "over-under",
          "explicitSubsupPlacement": true,
          "isExtensibleSymbol": true
        }
        "#);
    }

    #[test]
    fn markup_trees_survive_a_round_trip() {
        for input in [
            r"\sum_{k=1}^n k^2",
            r"\lim\nolimits_{x\to 0} \frac{\sin x}{x}",
            r"^2 \operatorname*{argmax}_y \mathop{T}",
            r"{\displaystyle\Large \textcolor{red}{a}} \colorbox{yellow}{b}",
            r"\dfrac{\hphantom{xx}}{\vphantom{y}\phantom{z}}",
            r"a-b*c",
        ] {
            let atoms = parse(input);
            assert_eq!(round_trip(&atoms), atoms, "{input}");
        }
    }

    #[test]
    fn flags_and_styles_survive_a_round_trip() {
        let mut atom = Atom::group(
            vec![Atom::symbol(AtomType::Mord, None, "x")],
            Style {
                font_size: Some(FontSize::Auto),
                letter_shape_style: Some(LetterShapeStyle::Upright),
                ..Default::default()
            },
            None,
        );
        atom.id = Some("7".to_string());
        atom.caret = true;
        atom.is_selected = true;
        atom.subscript = Some(Vec::new());
        let json = atom.to_json();
        assert_eq!(json.style.font_size, Some(FontSizeJson::Named("auto".into())));
        assert_eq!(Atom::from_json(&json).unwrap(), atom);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let atoms = from_json_str(r#"[{"type": "mrel", "value": "=", "foo": 1}]"#).unwrap();
        assert_eq!(atoms, [Atom::symbol(AtomType::Mrel, None, "=")]);
    }

    #[test]
    fn invalid_snapshots() {
        assert!(matches!(
            from_json_str(r#"[{"type": "sqrt"}]"#),
            Err(SnapshotError::UnknownType(tag)) if tag == "sqrt"
        ));
        assert!(matches!(
            from_json_str(r#"[{"type": "mop"}]"#),
            Err(SnapshotError::MissingContent("mop"))
        ));
        assert!(matches!(
            from_json_str(r#"[{"type": "mord", "value": "x", "limits": "sideways"}]"#),
            Err(SnapshotError::InvalidField { field: "limits", .. })
        ));
        assert!(matches!(
            from_json_str(r#"[{"type": "group", "style": {"fontSize": 11}}]"#),
            Err(SnapshotError::InvalidField { field: "fontSize", .. })
        ));
        assert!(matches!(from_json_str("[{"), Err(SnapshotError::Json(_))));
    }
}
