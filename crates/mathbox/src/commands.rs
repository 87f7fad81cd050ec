use box_model::mathstyle::MathstyleName;

use crate::atom::{AtomType, PhantomKind, SubsupPlacement};
use crate::token::Token;

use AtomType::{Mbin, Mclose, Mopen, Mord, Mpunct, Mrel};
use SubsupPlacement::{Adjacent, Auto};

static COMMANDS: phf::Map<&'static str, Token<'static>> = phf::phf_map! {
    // Lowercase Greek
    "alpha" => Token::Symbol(Mord, 'α'),
    "beta" => Token::Symbol(Mord, 'β'),
    "gamma" => Token::Symbol(Mord, 'γ'),
    "delta" => Token::Symbol(Mord, 'δ'),
    "epsilon" => Token::Symbol(Mord, 'ϵ'),
    "varepsilon" => Token::Symbol(Mord, 'ε'),
    "zeta" => Token::Symbol(Mord, 'ζ'),
    "eta" => Token::Symbol(Mord, 'η'),
    "theta" => Token::Symbol(Mord, 'θ'),
    "vartheta" => Token::Symbol(Mord, 'ϑ'),
    "iota" => Token::Symbol(Mord, 'ι'),
    "kappa" => Token::Symbol(Mord, 'κ'),
    "lambda" => Token::Symbol(Mord, 'λ'),
    "mu" => Token::Symbol(Mord, 'μ'),
    "nu" => Token::Symbol(Mord, 'ν'),
    "xi" => Token::Symbol(Mord, 'ξ'),
    "pi" => Token::Symbol(Mord, 'π'),
    "varpi" => Token::Symbol(Mord, 'ϖ'),
    "rho" => Token::Symbol(Mord, 'ρ'),
    "varrho" => Token::Symbol(Mord, 'ϱ'),
    "sigma" => Token::Symbol(Mord, 'σ'),
    "tau" => Token::Symbol(Mord, 'τ'),
    "upsilon" => Token::Symbol(Mord, 'υ'),
    "phi" => Token::Symbol(Mord, 'ϕ'),
    "varphi" => Token::Symbol(Mord, 'φ'),
    "chi" => Token::Symbol(Mord, 'χ'),
    "psi" => Token::Symbol(Mord, 'ψ'),
    "omega" => Token::Symbol(Mord, 'ω'),
    // Uppercase Greek
    "Gamma" => Token::Symbol(Mord, 'Γ'),
    "Delta" => Token::Symbol(Mord, 'Δ'),
    "Theta" => Token::Symbol(Mord, 'Θ'),
    "Lambda" => Token::Symbol(Mord, 'Λ'),
    "Xi" => Token::Symbol(Mord, 'Ξ'),
    "Pi" => Token::Symbol(Mord, 'Π'),
    "Sigma" => Token::Symbol(Mord, 'Σ'),
    "Upsilon" => Token::Symbol(Mord, 'Υ'),
    "Phi" => Token::Symbol(Mord, 'Φ'),
    "Psi" => Token::Symbol(Mord, 'Ψ'),
    "Omega" => Token::Symbol(Mord, 'Ω'),
    // Symbols
    "infty" => Token::Symbol(Mord, '∞'),
    "partial" => Token::Symbol(Mord, '∂'),
    "vert" => Token::Symbol(Mord, '|'),
    "pm" => Token::Symbol(Mbin, '±'),
    "times" => Token::Symbol(Mbin, '×'),
    "cdot" => Token::Symbol(Mbin, '⋅'),
    "ast" => Token::Symbol(Mbin, '∗'),
    "ne" => Token::Symbol(Mrel, '≠'),
    "neq" => Token::Symbol(Mrel, '≠'),
    "le" => Token::Symbol(Mrel, '≤'),
    "leq" => Token::Symbol(Mrel, '≤'),
    "ge" => Token::Symbol(Mrel, '≥'),
    "geq" => Token::Symbol(Mrel, '≥'),
    "in" => Token::Symbol(Mrel, '∈'),
    "to" => Token::Symbol(Mrel, '→'),
    "rightarrow" => Token::Symbol(Mrel, '→'),
    "lbrack" => Token::Symbol(Mopen, '['),
    "rbrack" => Token::Symbol(Mclose, ']'),
    "colon" => Token::Symbol(Mpunct, ':'),
    // Large operators
    "sum" => Token::BigOp('∑', Auto),
    "prod" => Token::BigOp('∏', Auto),
    "coprod" => Token::BigOp('∐', Auto),
    "bigcap" => Token::BigOp('⋂', Auto),
    "bigcup" => Token::BigOp('⋃', Auto),
    "bigvee" => Token::BigOp('⋁', Auto),
    "bigwedge" => Token::BigOp('⋀', Auto),
    "bigodot" => Token::BigOp('⨀', Auto),
    "bigoplus" => Token::BigOp('⨁', Auto),
    "bigotimes" => Token::BigOp('⨂', Auto),
    "biguplus" => Token::BigOp('⨄', Auto),
    "bigsqcup" => Token::BigOp('⨆', Auto),
    "int" => Token::BigOp('∫', Adjacent),
    "iint" => Token::BigOp('∬', Adjacent),
    "oint" => Token::BigOp('∮', Adjacent),
    "smallint" => Token::BigOp('∫', Adjacent),
    // Named operators
    "arccos" => Token::NamedOp("arccos", Adjacent),
    "arcsin" => Token::NamedOp("arcsin", Adjacent),
    "arctan" => Token::NamedOp("arctan", Adjacent),
    "arg" => Token::NamedOp("arg", Adjacent),
    "cos" => Token::NamedOp("cos", Adjacent),
    "cosh" => Token::NamedOp("cosh", Adjacent),
    "cot" => Token::NamedOp("cot", Adjacent),
    "coth" => Token::NamedOp("coth", Adjacent),
    "csc" => Token::NamedOp("csc", Adjacent),
    "deg" => Token::NamedOp("deg", Adjacent),
    "dim" => Token::NamedOp("dim", Adjacent),
    "exp" => Token::NamedOp("exp", Adjacent),
    "hom" => Token::NamedOp("hom", Adjacent),
    "ker" => Token::NamedOp("ker", Adjacent),
    "lg" => Token::NamedOp("lg", Adjacent),
    "ln" => Token::NamedOp("ln", Adjacent),
    "log" => Token::NamedOp("log", Adjacent),
    "sec" => Token::NamedOp("sec", Adjacent),
    "sin" => Token::NamedOp("sin", Adjacent),
    "sinh" => Token::NamedOp("sinh", Adjacent),
    "tan" => Token::NamedOp("tan", Adjacent),
    "tanh" => Token::NamedOp("tanh", Adjacent),
    "det" => Token::NamedOp("det", Auto),
    "gcd" => Token::NamedOp("gcd", Auto),
    "inf" => Token::NamedOp("inf", Auto),
    "lim" => Token::NamedOp("lim", Auto),
    "max" => Token::NamedOp("max", Auto),
    "min" => Token::NamedOp("min", Auto),
    "Pr" => Token::NamedOp("Pr", Auto),
    "sup" => Token::NamedOp("sup", Auto),
    "mathop" => Token::MathOp,
    // The argument is filled in by the lexer.
    "operatorname" => Token::OperatorName("", false),
    "operatorname*" => Token::OperatorName("", true),
    "limits" => Token::Limits(SubsupPlacement::OverUnder),
    "nolimits" => Token::Limits(Adjacent),
    "displaylimits" => Token::Limits(Auto),
    // Styles and sizes
    "displaystyle" => Token::Style(MathstyleName::Displaystyle),
    "textstyle" => Token::Style(MathstyleName::Textstyle),
    "scriptstyle" => Token::Style(MathstyleName::Scriptstyle),
    "scriptscriptstyle" => Token::Style(MathstyleName::Scriptscriptstyle),
    "tiny" => Token::Size(1),
    "scriptsize" => Token::Size(2),
    "footnotesize" => Token::Size(3),
    "small" => Token::Size(4),
    "normalsize" => Token::Size(5),
    "large" => Token::Size(6),
    "Large" => Token::Size(7),
    "LARGE" => Token::Size(8),
    "huge" => Token::Size(9),
    "Huge" => Token::Size(10),
    "textcolor" => Token::TextColor(""),
    "colorbox" => Token::ColorBox(""),
    "frac" => Token::Frac(None),
    "dfrac" => Token::Frac(Some(MathstyleName::Displaystyle)),
    "tfrac" => Token::Frac(Some(MathstyleName::Textstyle)),
    "phantom" => Token::Phantom(PhantomKind::Phantom),
    "hphantom" => Token::Phantom(PhantomKind::HPhantom),
    "vphantom" => Token::Phantom(PhantomKind::VPhantom),
};

/// Look up a command by its name without the backslash.
#[inline]
pub fn get_command(command: &str) -> Option<Token<'static>> {
    COMMANDS.get(command).copied()
}

static SIZE_COMMANDS: [&str; 10] = [
    r"\tiny",
    r"\scriptsize",
    r"\footnotesize",
    r"\small",
    r"\normalsize",
    r"\large",
    r"\Large",
    r"\LARGE",
    r"\huge",
    r"\Huge",
];

/// The command that selects font size `size` (1 to 10).
pub fn size_command(size: u8) -> Option<&'static str> {
    SIZE_COMMANDS
        .get(usize::from(size.checked_sub(1)?))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_commands_match_the_table() {
        for size in 1..=10 {
            let Some(cmd) = size_command(size) else {
                panic!("no command for size {size}");
            };
            assert_eq!(get_command(&cmd[1..]), Some(Token::Size(size)));
        }
        assert_eq!(size_command(0), None);
        assert_eq!(size_command(11), None);
    }

    #[test]
    fn operator_placement() {
        assert_eq!(get_command("sum"), Some(Token::BigOp('∑', Auto)));
        assert_eq!(get_command("int"), Some(Token::BigOp('∫', Adjacent)));
        assert_eq!(get_command("lim"), Some(Token::NamedOp("lim", Auto)));
        assert_eq!(get_command("sin"), Some(Token::NamedOp("sin", Adjacent)));
        assert_eq!(get_command("foo"), None);
    }
}
