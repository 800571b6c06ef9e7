/// GLSL ES 1.00 types and qualifiers

use std::fmt;

use crate::context::ShaderStage;

/// Basic and user-defined types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GlslType {
    Void,
    Bool,
    Int,
    Float,
    Vec(u8),
    BVec(u8),
    IVec(u8),
    Mat(u8),
    Sampler2D,
    SamplerCube,
    Struct(String),
}

impl GlslType {
    /// Built-in type named by `keyword`
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let ty = match keyword {
            "void" => GlslType::Void,
            "bool" => GlslType::Bool,
            "int" => GlslType::Int,
            "float" => GlslType::Float,
            "vec2" => GlslType::Vec(2),
            "vec3" => GlslType::Vec(3),
            "vec4" => GlslType::Vec(4),
            "bvec2" => GlslType::BVec(2),
            "bvec3" => GlslType::BVec(3),
            "bvec4" => GlslType::BVec(4),
            "ivec2" => GlslType::IVec(2),
            "ivec3" => GlslType::IVec(3),
            "ivec4" => GlslType::IVec(4),
            "mat2" => GlslType::Mat(2),
            "mat3" => GlslType::Mat(3),
            "mat4" => GlslType::Mat(4),
            "sampler2D" => GlslType::Sampler2D,
            "samplerCube" => GlslType::SamplerCube,
            _ => return None,
        };
        Some(ty)
    }

    /// Whether a value of this type needs a float precision
    pub fn is_float_based(&self) -> bool {
        matches!(self, GlslType::Float | GlslType::Vec(_) | GlslType::Mat(_))
    }

    /// Attribute slots consumed by a vertex input of this type
    pub fn attribute_slots(&self) -> u32 {
        match self {
            GlslType::Mat(n) => u32::from(*n),
            _ => 1,
        }
    }
}

impl fmt::Display for GlslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlslType::Void => f.write_str("void"),
            GlslType::Bool => f.write_str("bool"),
            GlslType::Int => f.write_str("int"),
            GlslType::Float => f.write_str("float"),
            GlslType::Vec(n) => write!(f, "vec{}", n),
            GlslType::BVec(n) => write!(f, "bvec{}", n),
            GlslType::IVec(n) => write!(f, "ivec{}", n),
            GlslType::Mat(n) => write!(f, "mat{}", n),
            GlslType::Sampler2D => f.write_str("sampler2D"),
            GlslType::SamplerCube => f.write_str("samplerCube"),
            GlslType::Struct(name) => f.write_str(name),
        }
    }
}

/// Type of a declared variable, including its array size expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableType {
    pub base: GlslType,
    /// Array size as written in the source, `None` for scalars
    pub array: Option<String>,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.array {
            Some(size) => write!(f, "{}[{}]", self.base, size),
            None => write!(f, "{}", self.base),
        }
    }
}

/// Global storage qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageQualifier {
    Const,
    Attribute,
    Varying,
    Uniform,
}

impl StorageQualifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "const" => Some(StorageQualifier::Const),
            "attribute" => Some(StorageQualifier::Attribute),
            "varying" => Some(StorageQualifier::Varying),
            "uniform" => Some(StorageQualifier::Uniform),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            StorageQualifier::Const => "const",
            StorageQualifier::Attribute => "attribute",
            StorageQualifier::Varying => "varying",
            StorageQualifier::Uniform => "uniform",
        }
    }
}

pub fn is_precision_qualifier(word: &str) -> bool {
    matches!(word, "lowp" | "mediump" | "highp")
}

/// Words that can never be used as identifiers
pub fn is_reserved(word: &str) -> bool {
    GlslType::from_keyword(word).is_some()
        || StorageQualifier::from_keyword(word).is_some()
        || is_precision_qualifier(word)
        || matches!(
            word,
            "break" | "continue" | "do" | "for" | "while" | "if" | "else" | "in" | "out"
                | "inout" | "true" | "false" | "precision" | "invariant" | "discard"
                | "return" | "struct"
        )
}

/// Built-in functions of GLSL ES 1.00 (angle, exponential, common, geometric,
/// matrix, vector relational and texture lookup functions)
pub fn is_builtin_function(word: &str) -> bool {
    matches!(
        word,
        "radians" | "degrees" | "sin" | "cos" | "tan" | "asin" | "acos" | "atan"
            | "pow" | "exp" | "log" | "exp2" | "log2" | "sqrt" | "inversesqrt"
            | "abs" | "sign" | "floor" | "ceil" | "fract" | "mod" | "min" | "max"
            | "clamp" | "mix" | "step" | "smoothstep"
            | "length" | "distance" | "dot" | "cross" | "normalize" | "faceforward"
            | "reflect" | "refract" | "matrixCompMult"
            | "lessThan" | "lessThanEqual" | "greaterThan" | "greaterThanEqual"
            | "equal" | "notEqual" | "any" | "all" | "not"
            | "texture2D" | "texture2DProj" | "texture2DLod" | "texture2DProjLod"
            | "textureCube" | "textureCubeLod"
    )
}

/// Built-in variables and constants visible in `stage`
pub fn is_builtin_variable(word: &str, stage: ShaderStage) -> bool {
    let common = matches!(
        word,
        "gl_DepthRange" | "gl_MaxVertexAttribs" | "gl_MaxVertexUniformVectors"
            | "gl_MaxVaryingVectors" | "gl_MaxVertexTextureImageUnits"
            | "gl_MaxCombinedTextureImageUnits" | "gl_MaxTextureImageUnits"
            | "gl_MaxFragmentUniformVectors" | "gl_MaxDrawBuffers"
    );
    common
        || match stage {
            ShaderStage::Vertex => matches!(word, "gl_Position" | "gl_PointSize"),
            ShaderStage::Fragment => matches!(
                word,
                "gl_FragCoord" | "gl_FrontFacing" | "gl_FragColor" | "gl_FragData" | "gl_PointCoord"
            ),
        }
}
