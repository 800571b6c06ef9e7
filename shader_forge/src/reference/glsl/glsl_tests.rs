//! Unit tests for the GLSL ES 1.00 front end
//!
//! Covers the tokenizer, the parser and interface extraction.

use crate::context::ShaderStage;
use crate::reference::glsl::lexer::{tokenize, TokenKind};
use crate::reference::glsl::parser::{Parser, MAX_NESTING_DEPTH};
use crate::reference::glsl::{compile, format_log, Diagnostic, GlslType};

const COLOR_VS: &str = "
    attribute vec2 a_position;
    attribute vec3 a_color;
    varying vec3 v_color;
    void main() {
        gl_Position = vec4(a_position, 0.0, 1.0);
        gl_PointSize = 12.0;
        v_color = a_color;
    }
";

const COLOR_FS: &str = "
    precision mediump float;
    varying vec3 v_color;
    void main() {
        gl_FragColor = vec4(v_color, 1.0);
    }
";

fn first_error(source: &str, stage: ShaderStage) -> Diagnostic {
    let errors = compile(source, stage).expect_err("source should not compile");
    errors.into_iter().next().unwrap()
}

// ============================================================================
// LEXER TESTS
// ============================================================================

#[test]
fn test_tokenize_tracks_lines() {
    let tokens = tokenize("float a;\n\nvec2 b;").unwrap();
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[3].text(), "vec2");
    assert_eq!(tokens[3].line, 3);
    assert!(matches!(tokens.last().unwrap().kind, TokenKind::Eof));
}

#[test]
fn test_tokenize_skips_comments_and_directives() {
    let source = "#version 100\n// line comment\n/* block\ncomment */ int x; // tail";
    let tokens = tokenize(source).unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["int", "x", ";", ""]);
    assert_eq!(tokens[0].line, 4);
}

#[test]
fn test_tokenize_numbers_and_operators() {
    let tokens = tokenize("a += 1.5e-3 * .5 << 0x1F;").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["a", "+=", "1.5e-3", "*", ".5", "<<", "0x1F", ";", ""]);
    assert!(matches!(tokens[2].kind, TokenKind::Number(_)));
}

#[test]
fn test_tokenize_rejects_invalid_character() {
    let err = tokenize("float a = 1.0;\nfloat b = @;").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.token, "@");
}

#[test]
fn test_tokenize_rejects_unterminated_comment() {
    let err = tokenize("int a; /* never closed").unwrap_err();
    assert_eq!(err.message, "unterminated comment");
}

// ============================================================================
// VALID SHADERS
// ============================================================================

#[test]
fn test_color_pair_compiles() {
    let vs = compile(COLOR_VS, ShaderStage::Vertex).unwrap();
    let fs = compile(COLOR_FS, ShaderStage::Fragment).unwrap();

    assert!(vs.has_main);
    assert!(fs.has_main);
    assert_eq!(vs.attributes.len(), 2);
    assert_eq!(vs.attributes[0].name, "a_position");
    assert_eq!(vs.attributes[0].ty.base, GlslType::Vec(2));
    assert_eq!(vs.varyings[0].ty.base, GlslType::Vec(3));
    assert_eq!(fs.varyings[0].name, "v_color");
    assert!(vs.is_referenced("a_color"));
    assert!(fs.is_referenced("v_color"));
}

#[test]
fn test_texture_shader_compiles() {
    let fs = "
        precision mediump float;
        uniform sampler2D u_texture;
        uniform float u_mix;
        varying vec2 v_uv;
        varying vec3 v_color;
        void main() {
            vec4 texel = texture2D(u_texture, v_uv);
            gl_FragColor = mix(vec4(v_color, 1.0), texel, u_mix);
        }
    ";
    let interface = compile(fs, ShaderStage::Fragment).unwrap();
    assert_eq!(interface.uniforms.len(), 2);
    assert_eq!(interface.uniform("u_texture").unwrap().ty.base, GlslType::Sampler2D);
    assert!(interface.is_referenced("u_mix"));
}

#[test]
fn test_control_flow_and_functions_compile() {
    let vs = "
        uniform mat4 u_mvp;
        uniform float u_points[4];
        attribute vec3 a_position;
        struct Light { vec3 dir; float power; };
        const int COUNT = 4;

        float sum(const in float values[4]);

        float sum(const in float values[4]) {
            float total = 0.0;
            for (int i = 0; i < COUNT; ++i) {
                total += values[i];
            }
            return total;
        }

        void main(void) {
            Light light = Light(vec3(0.0, 1.0, 0.0), 1.0);
            float s = sum(u_points);
            int n = 0;
            while (n < 3) { n++; if (n == 2) break; else continue; }
            do { s -= 1.0; } while (s > 10.0);
            bool flag = s > 0.0 && !(n != 3) ^^ false;
            gl_Position = u_mvp * vec4(a_position * light.dir.y, flag ? s : -s);
            gl_Position.xy *= 0.5;
        }
    ";
    let interface = compile(vs, ShaderStage::Vertex).unwrap();
    assert_eq!(interface.uniforms[1].ty.array.as_deref(), Some("4"));
    assert!(interface.is_referenced("u_mvp"));
}

#[test]
fn test_precision_qualifier_on_declaration_satisfies_fragment() {
    let fs = "varying highp vec2 v_uv; void main() { highp vec2 uv = v_uv; gl_FragColor = vec4(uv, 0.0, 1.0); }";
    assert!(compile(fs, ShaderStage::Fragment).is_ok());
}

// ============================================================================
// SYNTAX ERRORS
// ============================================================================

#[test]
fn test_missing_semicolon_reports_next_token() {
    let vs = "void main() {\n    gl_Position = vec4(0.0, 0.0, 0.0, 1.0)\n    gl_PointSize = 20.0;\n}\n";
    let err = first_error(vs, ShaderStage::Vertex);
    assert_eq!(err.line, 3);
    assert_eq!(err.token, "gl_PointSize");
    assert_eq!(err.message, "syntax error");
    assert_eq!(err.to_string(), "ERROR: 0:3: 'gl_PointSize' : syntax error");
}

#[test]
fn test_missing_semicolon_before_closing_brace() {
    let fs = "precision mediump float;\nvoid main() {\n gl_FragColor = vec4(1.0)\n}";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.token, "}");
    assert_eq!(err.line, 4);
}

#[test]
fn test_unbalanced_parenthesis() {
    let err = first_error("void main() { gl_Position = vec4(1.0; }", ShaderStage::Vertex);
    assert_eq!(err.token, ";");
}

#[test]
fn test_unexpected_end_of_input() {
    let err = first_error("void main() { gl_Position = vec4(1.0);", ShaderStage::Vertex);
    assert_eq!(err.token, "");
}

#[test]
fn test_reserved_word_as_name() {
    let err = first_error("attribute vec2 varying;", ShaderStage::Vertex);
    assert_eq!(err.token, "varying");
}

#[test]
fn test_unknown_type() {
    let err = first_error("vector3 position;", ShaderStage::Vertex);
    assert_eq!(err.token, "vector3");
}

// ============================================================================
// SEMANTIC ERRORS
// ============================================================================

#[test]
fn test_attribute_rejected_in_fragment_stage() {
    let fs = "precision mediump float; attribute vec2 a_position; void main() { gl_FragColor = vec4(1.0); }";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.token, "attribute");
    assert_eq!(err.message, "supported in vertex shaders only");
}

#[test]
fn test_fragment_without_float_precision() {
    let fs = "varying vec3 v_color;\nvoid main() { gl_FragColor = vec4(v_color, 1.0); }";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.line, 1);
    assert_eq!(err.token, "vec3");
    assert!(err.message.contains("No precision specified"));
}

#[test]
fn test_vertex_has_default_float_precision() {
    assert!(compile("varying vec3 v_color; void main() { v_color = vec3(1.0); }", ShaderStage::Vertex).is_ok());
}

#[test]
fn test_discard_only_in_fragment() {
    let err = first_error("void main() { discard; }", ShaderStage::Vertex);
    assert_eq!(err.token, "discard");
}

#[test]
fn test_duplicate_main() {
    let vs = "void main() { }\nvoid main() { }";
    let err = first_error(vs, ShaderStage::Vertex);
    assert_eq!(err.line, 2);
    assert_eq!(err.message, "function already has a body");
}

#[test]
fn test_uniform_initializer_rejected() {
    let err = first_error("uniform float u_size = 1.0; void main() { }", ShaderStage::Vertex);
    assert_eq!(err.token, "u_size");
    assert_eq!(err.message, "cannot initialize this type of qualifier");
}

#[test]
fn test_const_requires_initializer() {
    let err = first_error("const float k; void main() { }", ShaderStage::Vertex);
    assert!(err.message.contains("must be initialized"));
}

#[test]
fn test_global_redefinition() {
    let err = first_error("uniform float a; uniform vec2 a; void main() { }", ShaderStage::Vertex);
    assert_eq!(err.message, "redefinition");
}

#[test]
fn test_varying_cannot_be_int() {
    let err = first_error("varying int v_id; void main() { }", ShaderStage::Vertex);
    assert_eq!(err.token, "varying");
}

#[test]
fn test_semantic_errors_accumulate() {
    let fs = "attribute vec2 a;\nvarying vec3 v;\nvoid main() { }";
    let errors = compile(fs, ShaderStage::Fragment).unwrap_err();
    assert!(errors.len() >= 2);
    let log = format_log(&errors);
    assert_eq!(log.lines().count(), errors.len());
    assert!(log.lines().all(|l| l.starts_with("ERROR: 0:")));
}

// ============================================================================
// NAME RESOLUTION
// ============================================================================

#[test]
fn test_misspelled_varying_is_undeclared() {
    let fs = "precision mediump float;\nvarying vec3 v_color;\nvoid main() { gl_FragColor = vec4(v_colr, 1.0); }";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.line, 3);
    assert_eq!(err.token, "v_colr");
    assert_eq!(err.message, "undeclared identifier");
}

#[test]
fn test_varying_must_be_declared_in_fragment() {
    let fs = "precision mediump float; void main() { gl_FragColor = vec4(v_color, 1.0); }";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.token, "v_color");
}

#[test]
fn test_builtins_are_stage_specific() {
    let err = first_error("void main() { gl_FragColor = vec4(1.0); }", ShaderStage::Vertex);
    assert_eq!(err.token, "gl_FragColor");

    let err = first_error("precision mediump float; void main() { gl_Position = vec4(1.0); }", ShaderStage::Fragment);
    assert_eq!(err.token, "gl_Position");

    let fs = "precision mediump float; void main() { gl_FragColor = gl_FragCoord / float(gl_MaxDrawBuffers); }";
    assert!(compile(fs, ShaderStage::Fragment).is_ok());
}

#[test]
fn test_unknown_function_is_rejected() {
    let err = first_error("void main() { gl_Position = vec4(lenght(vec2(1.0))); }", ShaderStage::Vertex);
    assert_eq!(err.token, "lenght");
    assert_eq!(err.message, "no matching overloaded function found");
}

#[test]
fn test_local_goes_out_of_scope() {
    let vs = "void main() { { float inner = 1.0; } gl_PointSize = inner; }";
    let err = first_error(vs, ShaderStage::Vertex);
    assert_eq!(err.token, "inner");

    let vs = "void main() { for (int i = 0; i < 2; i++) { } gl_PointSize = float(i); }";
    let err = first_error(vs, ShaderStage::Vertex);
    assert_eq!(err.token, "i");
}

#[test]
fn test_parameters_are_scoped_to_their_function() {
    let vs = "
        float twice(float value) { return value * 2.0; }
        void main() { gl_PointSize = twice(value); }
    ";
    let err = first_error(vs, ShaderStage::Vertex);
    assert_eq!(err.token, "value");
    assert_eq!(err.line, 3);
}

#[test]
fn test_local_redefinition_in_same_block() {
    let err = first_error("void main() { float a = 1.0; float a = 2.0; }", ShaderStage::Vertex);
    assert_eq!(err.token, "a");
    assert_eq!(err.message, "redefinition");

    assert!(compile("void main() { float a = 1.0; { float a = 2.0; } }", ShaderStage::Vertex).is_ok());
}

// ============================================================================
// DEFAULT PRECISION SCOPE
// ============================================================================

#[test]
fn test_local_precision_does_not_reach_globals() {
    let fs = "
        void helper() { precision mediump float; }
        varying vec3 v_color;
        void main() { gl_FragColor = vec4(v_color, 1.0); }
    ";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.token, "vec3");
    assert_eq!(err.line, 3);
}

#[test]
fn test_local_precision_covers_its_block() {
    let fs = "
        void main() {
            precision mediump float;
            vec4 color = vec4(0.5);
            { float alpha = 1.0; color.a = alpha; }
            gl_FragColor = color;
        }
    ";
    assert!(compile(fs, ShaderStage::Fragment).is_ok());

    let fs = "
        void main() {
            { precision mediump float; }
            float alpha = 1.0;
        }
    ";
    let err = first_error(fs, ShaderStage::Fragment);
    assert_eq!(err.token, "float");
}

// ============================================================================
// NESTING LIMITS
// ============================================================================

fn nested_parens(depth: usize) -> String {
    format!(
        "precision mediump float; void main() {{ float x = {}1.0{}; gl_FragColor = vec4(x); }}",
        "(".repeat(depth),
        ")".repeat(depth),
    )
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let err = first_error(&nested_parens(10_000), ShaderStage::Fragment);
    assert_eq!(err.token, "(");
    assert_eq!(err.message, "Expression too complex");
}

#[test]
fn test_moderate_nesting_compiles() {
    assert!(compile(&nested_parens(64), ShaderStage::Fragment).is_ok());
    assert!(compile(&nested_parens(MAX_NESTING_DEPTH - 8), ShaderStage::Fragment).is_ok());
}

#[test]
fn test_deep_call_nesting_is_rejected() {
    let depth = 10_000;
    let vs = format!(
        "void main() {{ gl_PointSize = {}1.0{}; }}",
        "abs(".repeat(depth),
        ")".repeat(depth),
    );
    let err = first_error(&vs, ShaderStage::Vertex);
    assert_eq!(err.message, "Expression too complex");
}

#[test]
fn test_long_unary_chain_compiles() {
    let vs = format!("void main() {{ bool b = {}true; }}", "!".repeat(10_000));
    assert!(compile(&vs, ShaderStage::Vertex).is_ok());
}

#[test]
fn test_long_operator_chain_compiles() {
    let vs = format!("void main() {{ float x = 1.0{}; }}", " + 1.0".repeat(10_000));
    assert!(compile(&vs, ShaderStage::Vertex).is_ok());
}

#[test]
fn test_deep_blocks_are_rejected() {
    let depth = 10_000;
    let vs = format!("void main() {{ {}{} }}", "{".repeat(depth), "}".repeat(depth));
    let err = first_error(&vs, ShaderStage::Vertex);
    assert_eq!(err.token, "{");
    assert_eq!(err.message, "Nesting too deep");
}

#[test]
fn test_deep_struct_definitions_are_rejected() {
    let depth = 10_000;
    let mut vs = String::new();
    for i in 0..depth {
        vs.push_str(&format!("struct S{} {{ ", i));
    }
    let err = first_error(&vs, ShaderStage::Vertex);
    assert_eq!(err.message, "Nesting too deep");
}

#[test]
fn test_long_else_if_chain_compiles() {
    let mut vs = String::from("void main() { int n = 0; if (n == 0) n = 1;");
    for i in 1..2_000 {
        vs.push_str(&format!(" else if (n == {}) n = {};", i, i + 1));
    }
    vs.push_str(" else n = 0; }");
    assert!(compile(&vs, ShaderStage::Vertex).is_ok());
}

// ============================================================================
// PARSER INPUT
// ============================================================================

#[test]
fn test_parser_accepts_empty_token_slice() {
    let interface = Parser::new(&[], ShaderStage::Vertex).parse().unwrap();
    assert!(!interface.has_main);
    assert!(interface.attributes.is_empty());
}

#[test]
fn test_parser_accepts_tokens_without_eof() {
    let mut tokens = tokenize("void main() { }").unwrap();
    tokens.pop();

    let interface = Parser::new(&tokens, ShaderStage::Vertex).parse().unwrap();
    assert!(interface.has_main);
}
