use rustc_hash::FxHashMap;

use box_model::dimension::{Dimension, DimensionUnit, Glue, RegisterValue};

/// A register table: register name (without the backslash) to value.
pub type Registers = FxHashMap<String, RegisterValue>;

const fn pt(value: f64) -> Dimension {
    Dimension::new(value, DimensionUnit::Pt)
}

const fn mu(value: f64) -> Dimension {
    Dimension::new(value, DimensionUnit::Mu)
}

/// The registers that every root context starts with.
pub fn default_registers() -> Registers {
    let entries: [(&str, RegisterValue); 19] = [
        ("p@", pt(1.0).into()),
        ("z@", pt(0.0).into()),
        ("baselineskip", pt(12.0).into()),
        ("jot", pt(3.0).into()),
        ("arraycolsep", pt(5.0).into()),
        ("arrayrulewidth", pt(0.4).into()),
        ("doublerulesep", pt(2.0).into()),
        ("fboxsep", pt(3.0).into()),
        ("fboxrule", pt(0.4).into()),
        ("thinmuskip", Glue::fixed(mu(3.0)).into()),
        (
            "medmuskip",
            Glue {
                glue: mu(4.0),
                grow: Some(mu(2.0)),
                shrink: Some(mu(4.0)),
            }
            .into(),
        ),
        (
            "thickmuskip",
            Glue {
                glue: mu(5.0),
                grow: Some(mu(5.0)),
                shrink: None,
            }
            .into(),
        ),
        (
            "smallskipamount",
            Glue {
                glue: pt(3.0),
                grow: Some(pt(1.0)),
                shrink: Some(pt(1.0)),
            }
            .into(),
        ),
        (
            "medskipamount",
            Glue {
                glue: pt(6.0),
                grow: Some(pt(2.0)),
                shrink: Some(pt(2.0)),
            }
            .into(),
        ),
        (
            "bigskipamount",
            Glue {
                glue: pt(12.0),
                grow: Some(pt(4.0)),
                shrink: Some(pt(4.0)),
            }
            .into(),
        ),
        ("scriptspace", pt(0.5).into()),
        ("nulldelimiterspace", pt(1.2).into()),
        ("delimiterfactor", RegisterValue::Number(901.0)),
        ("delimitershortfall", pt(5.0).into()),
    ];
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Build a register table from textual definitions, e.g. `("jot", "4pt")`.
///
/// A leading backslash on the name is ignored.
pub fn parse_registers<'a>(definitions: impl IntoIterator<Item = (&'a str, &'a str)>) -> Registers {
    definitions
        .into_iter()
        .map(|(name, value)| {
            (
                name.strip_prefix('\\').unwrap_or(name).to_string(),
                RegisterValue::parse(value),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_muskips() {
        let registers = default_registers();
        assert_eq!(
            registers.get("thinmuskip").and_then(RegisterValue::as_dimension),
            Some(mu(3.0))
        );
        assert!(matches!(
            registers.get("medmuskip"),
            Some(RegisterValue::Glue(Glue {
                grow: Some(_),
                shrink: Some(_),
                ..
            }))
        ));
        assert_eq!(
            registers.get("delimiterfactor"),
            Some(&RegisterValue::Number(901.0))
        );
    }

    #[test]
    fn parse_definitions() {
        let registers = parse_registers([("\\jot", "4pt"), ("thinmuskip", "2mu"), ("x", "blue")]);
        assert_eq!(registers.get("jot"), Some(&RegisterValue::Dimension(pt(4.0))));
        assert_eq!(
            registers.get("thinmuskip"),
            Some(&RegisterValue::Dimension(mu(2.0)))
        );
        assert_eq!(
            registers.get("x"),
            Some(&RegisterValue::Literal("blue".to_string()))
        );
    }
}
