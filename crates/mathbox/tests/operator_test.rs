use box_model::dimension::{Dimension, DimensionUnit, RegisterValue};
use insta::assert_snapshot;
use mathbox::atom::{FontSize, Style, SubsupPlacement};
use mathbox::context::ScopeKind;
use mathbox::registers::default_registers;
use mathbox::{
    Atom, AtomType, BoxClasses, Context, GlobalContext, LetterShapeStyle, MathBox, MathDisplay,
    Mathstyle, MathboxConfig, Renderer, SerializeOptions, from_json_str, serialize_list,
    to_json_string,
};

fn has_class(b: &MathBox, class: BoxClasses) -> bool {
    b.classes.contains(class) || b.children().any(|child| has_class(child, class))
}

fn contains_glyph(b: &MathBox, text: &str) -> bool {
    b.is_glyph(text) || b.children().any(|child| contains_glyph(child, text))
}

fn assert_no_negative_extents(b: &MathBox) {
    assert!(b.height >= 0.0 && b.depth >= 0.0, "{}", b.dump());
    b.children().for_each(assert_no_negative_extents);
}

fn render(renderer: &Renderer, markup: &str, display: MathDisplay) -> MathBox {
    match renderer.render(markup, display) {
        Ok(Some(b)) => b,
        Ok(None) => panic!("{markup:?} rendered to nothing"),
        Err(err) => panic!("{markup:?}: {err}"),
    }
}

const ROUND_TRIP_PROBLEMS: [&str; 15] = [
    r"x^2+y^2=z^2",
    r"\sum_{k=1}^n k",
    r"\int_0^\infty e^{-x} dx",
    r"\lim\limits_{x\to 0}\frac{\sin x}{x}",
    r"\prod\nolimits_{p} a_p",
    r"^2_1 x",
    r"\operatorname{sn} u \operatorname*{argmax}_\theta f",
    r"\mathop{T}_a^b",
    r"{\displaystyle\frac{a}{b}} \tfrac12",
    r"\textcolor{red}{x} \colorbox{yellow}{\Large y}",
    r"\phantom{x}\hphantom{yy}\vphantom{\sum}",
    r"\smallint\iint\oint\bigcup_{i}",
    r"\lim * x",
    r"\alpha * b",
    r"\sum * 2",
];

#[test]
fn markup_round_trip_keeps_the_geometry() {
    let renderer = Renderer::default();
    for problem in ROUND_TRIP_PROBLEMS {
        let atoms = renderer.parse(problem).unwrap();
        let markup = serialize_list(&atoms, SerializeOptions::default());
        let reparsed = renderer.parse(&markup).unwrap();
        for display in [MathDisplay::Inline, MathDisplay::Block] {
            let original = renderer.render_atoms(&atoms, display).map(|b| b.dump());
            let restored = renderer.render_atoms(&reparsed, display).map(|b| b.dump());
            assert_eq!(original, restored, "{problem} -> {markup}");
        }
    }
}

#[test]
fn json_round_trip_serializes_identically() {
    let renderer = Renderer::default();
    for problem in ROUND_TRIP_PROBLEMS {
        let atoms = renderer.parse(problem).unwrap();
        for atom in &atoms {
            let restored = Atom::from_json(&atom.to_json()).unwrap();
            assert_eq!(
                restored.serialize(SerializeOptions::default()),
                atom.serialize(SerializeOptions::default()),
                "{problem}"
            );
        }
        let restored = from_json_str(&to_json_string(&atoms).unwrap()).unwrap();
        assert_eq!(
            serialize_list(&restored, SerializeOptions::default()),
            serialize_list(&atoms, SerializeOptions::default()),
            "{problem}"
        );
    }
}

#[test]
fn unset_size_is_inherited() {
    let global = GlobalContext::default();
    let root = Context::root(
        &global,
        Mathstyle::Text,
        5,
        LetterShapeStyle::Tex,
        default_registers(),
    );
    let style = Style {
        font_size: Some(FontSize::Size(3)),
        ..Default::default()
    };
    let c1 = Context::new(&root, Some(&style), ScopeKind::Auto);
    let c2 = Context::new(&c1, None, ScopeKind::Auto);
    let c3 = Context::new(&c2, None, ScopeKind::Superscript);
    assert_eq!(c1.size(), 3);
    assert_eq!(c2.size(), c1.size());
    assert_eq!(c3.size(), c1.size());
    assert_eq!(c3.mathstyle(), Mathstyle::Script);
}

#[test]
fn root_scaling_factor_is_one() {
    let global = GlobalContext::default();
    for style in [
        Mathstyle::Display,
        Mathstyle::DisplayCramped,
        Mathstyle::Text,
        Mathstyle::TextCramped,
        Mathstyle::Script,
        Mathstyle::ScriptCramped,
        Mathstyle::ScriptScript,
        Mathstyle::ScriptScriptCramped,
    ] {
        for size in [1, 5, 10] {
            let root = Context::root(
                &global,
                style,
                size,
                LetterShapeStyle::Tex,
                default_registers(),
            );
            assert_eq!(root.scaling_factor(), 1.0, "{style:?} at {size}");
        }
    }
}

#[test]
fn limits_follow_the_display_style() {
    let renderer = Renderer::default();
    for markup in [r"\sum_k", r"\bigcup_{i=1}^n", r"\max_x"] {
        let block = render(&renderer, markup, MathDisplay::Block);
        assert!(has_class(&block, BoxClasses::LIMITS), "{markup}");
        assert!(!has_class(&block, BoxClasses::MSUBSUP), "{markup}");

        let inline = render(&renderer, markup, MathDisplay::Inline);
        assert!(!has_class(&inline, BoxClasses::LIMITS), "{markup}");
        assert!(has_class(&inline, BoxClasses::MSUBSUP), "{markup}");
    }
    // Integrals keep their scripts at the side.
    let block = render(&renderer, r"\int_0^1", MathDisplay::Block);
    assert!(!has_class(&block, BoxClasses::LIMITS));
}

#[test]
fn explicit_placement_wins() {
    let renderer = Renderer::default();
    let block = render(&renderer, r"\sum\nolimits_k", MathDisplay::Block);
    assert!(!has_class(&block, BoxClasses::LIMITS));
    let inline = render(&renderer, r"\int\limits_0^1", MathDisplay::Inline);
    assert!(has_class(&inline, BoxClasses::LIMITS));
    let inline = render(&renderer, r"\sum\displaylimits_k", MathDisplay::Inline);
    assert!(!has_class(&inline, BoxClasses::LIMITS));
}

#[test]
fn only_the_exempted_symbol_stays_small() {
    let renderer = Renderer::default();
    let smallint = render(&renderer, r"\smallint", MathDisplay::Block);
    assert!(has_class(&smallint, BoxClasses::SMALL_OP));
    assert!(!has_class(&smallint, BoxClasses::LARGE_OP));

    for markup in [
        r"\sum",
        r"\prod",
        r"\coprod",
        r"\int",
        r"\iint",
        r"\oint",
        r"\bigcap",
        r"\bigcup",
        r"\bigvee",
        r"\bigwedge",
        r"\bigodot",
        r"\bigoplus",
        r"\bigotimes",
        r"\biguplus",
        r"\bigsqcup",
    ] {
        let block = render(&renderer, markup, MathDisplay::Block);
        assert!(has_class(&block, BoxClasses::LARGE_OP), "{markup}");
        let inline = render(&renderer, markup, MathDisplay::Inline);
        assert!(has_class(&inline, BoxClasses::SMALL_OP), "{markup}");
    }
}

#[test]
fn exemption_set_is_configurable() {
    let renderer = Renderer::new(MathboxConfig {
        small_operators: vec![r"\int".to_string()],
        ..Default::default()
    })
    .unwrap();
    let int = render(&renderer, r"\int", MathDisplay::Block);
    assert!(has_class(&int, BoxClasses::SMALL_OP));
    let smallint = render(&renderer, r"\smallint", MathDisplay::Block);
    assert!(has_class(&smallint, BoxClasses::LARGE_OP));
}

#[test]
fn global_register_write_reaches_the_whole_chain() {
    let global = GlobalContext::default();
    let root = Context::root(
        &global,
        Mathstyle::Display,
        5,
        LetterShapeStyle::Tex,
        default_registers(),
    );
    let c1 = Context::new(&root, None, ScopeKind::Auto);
    let c2 = Context::new(&c1, None, ScopeKind::Numerator);
    let c3 = Context::new(&c2, None, ScopeKind::Superscript);

    let shadow = RegisterValue::Dimension(Dimension::new(1.0, DimensionUnit::Pt));
    let value = RegisterValue::Dimension(Dimension::new(7.0, DimensionUnit::Pt));
    c1.set_register("x", Some(shadow.clone()));
    assert_eq!(c3.get_register("x"), Some(shadow));

    c3.set_global_register("x", value.clone());
    for context in [&root, &c1, &c2, &c3] {
        assert_eq!(context.get_register("x"), Some(value.clone()));
    }
}

#[test]
fn empty_boxes_are_left_out() {
    let renderer = Renderer::default();
    let empty = Atom::body_operator(r"\mathop", Vec::new(), true, SubsupPlacement::Auto);
    assert!(
        renderer
            .render_atoms(std::slice::from_ref(&empty), MathDisplay::Inline)
            .is_none()
    );

    let atoms = [
        Atom::symbol(AtomType::Mord, None, "x"),
        empty,
        Atom::symbol(AtomType::Mord, None, "y"),
    ];
    let Some(row) = renderer.render_atoms(&atoms, MathDisplay::Inline) else {
        panic!("expected a row");
    };
    assert_eq!(row.children().count(), 2);
}

#[test]
fn scripts_on_empty_bases() {
    let renderer = Renderer::default();
    for markup in [r"{}_{}", r"x_{}"] {
        for display in [MathDisplay::Inline, MathDisplay::Block] {
            assert!(renderer.render(markup, display).is_ok(), "{markup}");
        }
    }
    // The scripts survive even though the base is empty.
    for (markup, script) in [
        (r"{}^2", "2"),
        (r"\phantom{}^2", "2"),
        (r"\mathop{}_k", "k"),
        (r"\mathop{}_k x", "k"),
    ] {
        for display in [MathDisplay::Inline, MathDisplay::Block] {
            let b = render(&renderer, markup, display);
            assert!(contains_glyph(&b, script), "{markup}\n{}", b.dump());
        }
    }
}

#[test]
fn boxes_never_have_negative_extents() {
    let renderer = Renderer::default();
    for markup in [
        "x=y",
        r"a\to b",
        "-",
        r"\sum_{k=1}^n k^2 = \frac{1}{2}",
        r"\lim_{x\to 0} = 1",
        r"\int\limits_0^1 f",
    ] {
        for display in [MathDisplay::Inline, MathDisplay::Block] {
            assert_no_negative_extents(&render(&renderer, markup, display));
        }
    }
}

#[test]
fn zero_width_operator_serializes_to_its_scripts() {
    let x = || Atom::symbol(AtomType::Mord, None, "x");
    let atom = Atom::zero_width_operator().with_scripts(Some(vec![x()]), Some(vec![x(), x()]));
    assert_eq!(atom.serialize(SerializeOptions::default()), "_{xx}^x");

    let renderer = Renderer::default();
    let atoms = renderer.parse("^2 y").unwrap();
    assert_eq!(serialize_list(&atoms, SerializeOptions::default()), "^2y");
}

#[test]
fn box_tree_dump() {
    let b = render(&Renderer::default(), "xy", MathDisplay::Inline);
    assert_snapshot!(b.dump(), @r#"
    row mord w=1.062 h=0.431 d=0.194
      glyph mord "x" Math-Italic w=0.572 h=0.431 d=0
      glyph mord "y" Math-Italic w=0.49 h=0.431 d=0.194
    "#);
}

#[test]
fn atom_ids_from_a_counter() {
    let renderer = Renderer::new(MathboxConfig {
        atom_ids: mathbox::AtomIdMode::Counter,
        ..Default::default()
    })
    .unwrap();
    let atoms = renderer.parse(r"a\sum_k").unwrap();
    let Some(b) = renderer.render_atoms(&atoms, MathDisplay::Inline) else {
        panic!("expected a box");
    };
    assert!(b.find_by_atom_id("0").is_some());
    assert!(b.find_by_atom_id("1").is_some());
    assert!(b.find_by_atom_id("zz").is_none());
    // The counter restarts with every render call.
    let Some(again) = renderer.render_atoms(&atoms, MathDisplay::Inline) else {
        panic!("expected a box");
    };
    assert_eq!(again.dump(), b.dump());
}
