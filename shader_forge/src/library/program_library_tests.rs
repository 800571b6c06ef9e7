//! Unit tests for ProgramLibrary

use crate::builder::ProgramBuilder;
use crate::context::RenderContext;
use crate::error::Error;
use crate::library::ProgramLibrary;
use crate::reference::ReferenceContext;

const POINT_VS: &str = "
    attribute vec2 a_position;
    void main() {
        gl_Position = vec4(a_position, 0.0, 1.0);
        gl_PointSize = 10.0;
    }
";

const RED_FS: &str = "
    precision mediump float;
    void main() { gl_FragColor = vec4(1.0, 0.0, 0.0, 1.0); }
";

const BLUE_FS: &str = "
    precision mediump float;
    void main() { gl_FragColor = vec4(0.0, 0.0, 1.0, 1.0); }
";

fn library_with_two(ctx: &mut ReferenceContext) -> ProgramLibrary<ReferenceContext> {
    let mut library = ProgramLibrary::new(ProgramBuilder::new());
    library.build(ctx, "red", POINT_VS, RED_FS).unwrap();
    library.build(ctx, "blue", POINT_VS, BLUE_FS).unwrap();
    library
}

#[test]
fn test_build_and_get() {
    let mut ctx = ReferenceContext::new();
    let library = library_with_two(&mut ctx);

    assert_eq!(library.len(), 2);
    assert!(!library.is_empty());
    assert_ne!(library.get("red").unwrap().handle(), library.get("blue").unwrap().handle());
    assert!(library.get("green").is_none());
    assert_eq!(library.names().collect::<Vec<_>>(), vec!["red", "blue"]);
}

#[test]
fn test_duplicate_name_is_rejected_without_compiling() {
    let mut ctx = ReferenceContext::with_call_journal();
    let mut library = library_with_two(&mut ctx);
    ctx.clear_calls();

    let err = library.build(&mut ctx, "red", POINT_VS, BLUE_FS).unwrap_err();

    assert!(matches!(err, Error::InvalidResource(_)));
    assert!(ctx.calls().is_empty());
    assert_eq!(library.len(), 2);
}

#[test]
fn test_failed_build_stores_nothing() {
    let mut ctx = ReferenceContext::new();
    let mut library = ProgramLibrary::new(ProgramBuilder::new());

    let err = library.build(&mut ctx, "broken", POINT_VS, "void main() { gl_FragColor = vec4(1.0) }");

    assert!(matches!(err, Err(Error::ShaderCompile(_))));
    assert!(library.is_empty());
    assert_eq!(ctx.live_shader_count(), 0);
}

#[test]
fn test_activate_by_name() {
    let mut ctx = ReferenceContext::new();
    let library = library_with_two(&mut ctx);

    library.activate(&mut ctx, "blue").unwrap();
    assert_eq!(ctx.current_program(), Some(library.get("blue").unwrap().handle()));

    library.activate(&mut ctx, "red").unwrap();
    assert_eq!(ctx.current_program(), Some(library.get("red").unwrap().handle()));
}

#[test]
fn test_activate_unknown_name() {
    let mut ctx = ReferenceContext::new();
    let library = library_with_two(&mut ctx);

    let err = library.activate(&mut ctx, "green").unwrap_err();

    assert!(matches!(err, Error::InvalidResource(_)));
}

#[test]
fn test_remove_disposes_program() {
    let mut ctx = ReferenceContext::new();
    let mut library = library_with_two(&mut ctx);

    library.remove(&mut ctx, "red").unwrap();

    assert_eq!(library.len(), 1);
    assert_eq!(library.names().collect::<Vec<_>>(), vec!["blue"]);
    assert_eq!(ctx.live_program_count(), 1);
    assert_eq!(ctx.live_shader_count(), 2);
    assert!(matches!(library.remove(&mut ctx, "red"), Err(Error::InvalidResource(_))));
}

#[test]
fn test_dispose_all_leaves_no_objects() {
    let mut ctx = ReferenceContext::new();
    let mut library = library_with_two(&mut ctx);
    library.activate(&mut ctx, "red").unwrap();
    ctx.use_program(None);

    library.dispose_all(&mut ctx);

    assert!(library.is_empty());
    assert_eq!(library.names().count(), 0);
    assert_eq!(ctx.live_program_count(), 0);
    assert_eq!(ctx.live_shader_count(), 0);
}
