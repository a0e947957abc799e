use super::device::ShaderDialect;

pub const ATTR_POSITION: &str = "aPosition";
pub const ATTR_NORMAL: &str = "aNormal";
pub const ATTR_TEX_COORD: &str = "aTexCoord";
pub const UNIFORM_MVP: &str = "uMVPMatrix";
pub const UNIFORM_LIGHT_POS: &str = "uLightPos";
pub const UNIFORM_COLOR: &str = "uColor";

const VERTEX_BODY: &str = r#"
uniform mat4 uMVPMatrix;
attribute vec4 aPosition;
attribute vec3 aNormal;
attribute vec2 aTexCoord;
varying vec3 vNormal;
varying vec2 vTexCoord;

void main() {
    vNormal = aNormal;
    vTexCoord = aTexCoord;
    gl_Position = uMVPMatrix * aPosition;
}
"#;

// Diffuse term with a 0.1 floor so unlit faces never go black.
const FRAGMENT_BODY: &str = r#"
uniform vec3 uLightPos;
uniform vec4 uColor;
varying vec3 vNormal;
varying vec2 vTexCoord;

void main() {
    vec3 lightDir = normalize(uLightPos);
    float diff = max(dot(normalize(vNormal), lightDir), 0.1);
    gl_FragColor = vec4(uColor.rgb * diff, uColor.a);
}
"#;

fn header(dialect: ShaderDialect, fragment: bool) -> &'static str {
    match (dialect, fragment) {
        (ShaderDialect::Gles100, false) => "#version 100\n",
        (ShaderDialect::Gles100, true) => "#version 100\nprecision mediump float;\n",
        (ShaderDialect::Glsl120, _) => "#version 120\n",
    }
}

pub fn vertex_source(dialect: ShaderDialect) -> String {
    format!("{}{}", header(dialect, false), VERTEX_BODY)
}

pub fn fragment_source(dialect: ShaderDialect) -> String {
    format!("{}{}", header(dialect, true), FRAGMENT_BODY)
}
