use std::fs;
use std::path::Path;

use speck_engine::render::{CursorStyle, ParticleStyle};

fn load(name: &str) -> naga::Module {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src/render/shaders")
        .join(name);
    let source = fs::read_to_string(&path).unwrap();

    let module = match naga::front::wgsl::parse_str(&source) {
        Ok(module) => module,
        Err(e) => panic!("Failed to parse {name}:\n{}", e.emit_to_string(&source)),
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!("Failed to validate {name}:\n{e:?}");
    }

    module
}

/// Default value of the `override` named `name`, as the pipeline would pass it.
fn override_default(module: &naga::Module, name: &str) -> Option<f64> {
    let (_, o) = module
        .overrides
        .iter()
        .find(|(_, o)| o.name.as_deref() == Some(name))?;
    let init = o.init?;

    match module.global_expressions[init] {
        naga::Expression::Literal(naga::Literal::F32(v)) => Some(v as f64),
        naga::Expression::Literal(naga::Literal::AbstractFloat(v)) => Some(v as f32 as f64),
        naga::Expression::Literal(naga::Literal::Bool(b)) => Some(if b { 1.0 } else { 0.0 }),
        ref other => panic!("override {name} has non-literal default {other:?}"),
    }
}

fn assert_entry_points(module: &naga::Module, name: &str) {
    for (entry, stage) in [("vs_main", naga::ShaderStage::Vertex), ("fs_main", naga::ShaderStage::Fragment)] {
        assert!(
            module.entry_points.iter().any(|ep| ep.name == entry && ep.stage == stage),
            "{name} lacks {entry}"
        );
    }
}

fn assert_constants_match(module: &naga::Module, name: &str, constants: &[(&str, f64)]) {
    for &(key, value) in constants {
        let default = override_default(module, key)
            .unwrap_or_else(|| panic!("{name} declares no override `{key}` with a default"));
        assert_eq!(default, value, "{name}: default of `{key}` drifted from the renderer");
    }
    assert_eq!(
        module.overrides.len(),
        constants.len(),
        "{name} declares overrides the renderer never sets"
    );
}

#[test]
fn particle_shader_validates_and_matches_style() {
    let module = load("particles.wgsl");
    assert_entry_points(&module, "particles.wgsl");
    assert_constants_match(&module, "particles.wgsl", &ParticleStyle::default().pipeline_constants());
}

#[test]
fn cursor_shader_validates_and_matches_style() {
    let module = load("cursor.wgsl");
    assert_entry_points(&module, "cursor.wgsl");
    assert_constants_match(&module, "cursor.wgsl", &CursorStyle::default().pipeline_constants());
}

#[test]
fn soft_edges_discard_uncovered_fragments() {
    // The CPU mirror in `render::sprite::disc_alpha` assumes both shaders drop
    // zero-alpha fragments instead of writing them.
    for name in ["particles.wgsl", "cursor.wgsl"] {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/render/shaders").join(name);
        let source = fs::read_to_string(&path).unwrap();
        assert!(source.contains("if (alpha <= 0.0) {"), "{name} writes zero-alpha fragments");
        assert_eq!(source.matches("discard;").count(), 2, "{name}");
    }
}
