use gl::types::*;
use itertools::Itertools;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::ptr;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGED_IDS: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
    static ref MESSAGE_COUNT: Mutex<std::collections::HashMap<u32, u32>> = Mutex::new(std::collections::HashMap::new());
}

#[macro_export]
macro_rules! cstr {
    ($s:expr) => {
        concat!($s, "\0").as_ptr() as *const i8
    };
}

/// Affiche les informations OpenGL / GPU du contexte actuel
/// # Safety
///
/// L'appelant doit s'assurer que le contexte OpenGL est valide et actif.
pub unsafe fn show_opengl_context_info() {
    // Vendor / Renderer / Version / GLSL
    let vendor = CStr::from_ptr(gl::GetString(gl::VENDOR) as *const i8)
        .to_str()
        .unwrap_or("Unknown");
    let renderer = CStr::from_ptr(gl::GetString(gl::RENDERER) as *const i8)
        .to_str()
        .unwrap_or("Unknown");
    let version = CStr::from_ptr(gl::GetString(gl::VERSION) as *const i8)
        .to_str()
        .unwrap_or("Unknown");
    let glsl_version = CStr::from_ptr(gl::GetString(gl::SHADING_LANGUAGE_VERSION) as *const i8)
        .to_str()
        .unwrap_or("Unknown");

    info!("🖥 OpenGL context info:");
    info!("  Vendor   : {}", vendor);
    info!("  Renderer : {}", renderer);
    info!("  OpenGL   : {}", version);
    info!("  GLSL     : {}", glsl_version);

    let mut num_ext = 0;
    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_ext);
    info!("  Extensions: {} extensions detected", num_ext);

    // Récupère toutes les extensions OpenGL et les affiche en une seule ligne
    let mut extensions = Vec::new();
    for i in 0..num_ext {
        let ext = CStr::from_ptr(gl::GetStringi(gl::EXTENSIONS, i as u32) as *const i8)
            .to_str()
            .unwrap_or("Unknown");
        extensions.push(ext);
    }
    debug!("GL_EXTENSIONS = {}", extensions.iter().join(" "));

    // Consommer le glerror si nécessaire
    let err = gl::GetError();
    if err != gl::NO_ERROR {
        warn!("glerror consumed after getting context info: 0x{:X}", err);
    }
}

/// Callback OpenGL debug, safe pour Rust
extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const i8,
    _user_param: *mut c_void,
) {
    // Unsafe uniquement pour lire le C string
    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };

    if severity == gl::DEBUG_SEVERITY_NOTIFICATION {
        return; // ignore notifications
    }

    // Ne logue qu’une fois par ID
    let mut logged = LOGGED_IDS.lock().unwrap();
    if logged.contains(&id) {
        return;
    }
    logged.insert(id);

    let src_str = match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        gl::DEBUG_SOURCE_OTHER => "Other",
        _ => "Unknown",
    };

    let type_str = match type_ {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        gl::DEBUG_TYPE_OTHER => "Other",
        _ => "Unknown",
    };

    let sev_str = match severity {
        gl::DEBUG_SEVERITY_HIGH => "High",
        gl::DEBUG_SEVERITY_MEDIUM => "Medium",
        gl::DEBUG_SEVERITY_LOW => "Low",
        _ => "Unknown",
    };

    let mut counts = MESSAGE_COUNT.lock().unwrap();
    let count = counts.entry(id).or_insert(0);
    *count += 1;
    if *count == 1 {
        warn!(
            "[OpenGL Debug] id: {:X}, source: {}, type: {}, severity: {}, message: {}",
            id, src_str, type_str, sev_str, msg
        );
    }
}

/// Configure le debug OpenGL via `glDebugMessageCallback`.
///
/// # Safety
///
/// Cette fonction est unsafe car elle enregistre un callback C vers Rust.
/// L'appelant doit s'assurer que le contexte OpenGL est actif pendant toute
/// la durée de vie du callback.
pub unsafe fn setup_opengl_debug() {
    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS); // important pour que le callback soit synchrone
    gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null_mut());
    gl::DebugMessageControl(
        gl::DONT_CARE,
        gl::DONT_CARE,
        gl::DONT_CARE,
        0,
        std::ptr::null(),
        gl::TRUE,
    );
}

/// Compile et lie un programme shader à partir des sources GLSL embarquées.
/// En cas d'erreur, le log du driver est enrichi d'un extrait du source
/// autour de la ligne fautive.
///
/// # Safety
/// Interagit directement avec des pointeurs OpenGL; le contexte doit être
/// actif.
pub unsafe fn try_compile_program(vertex_src: &str, fragment_src: &str) -> Result<u32, String> {
    fn try_compile_shader(src: &str, ty: GLenum) -> Result<u32, String> {
        let shader = unsafe { gl::CreateShader(ty) };
        let c_str = CString::new(src).map_err(|e| format!("CString error: {}", e))?;

        unsafe {
            gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut success = gl::FALSE as GLint;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
            if success != gl::TRUE as GLint {
                let mut len = 0;
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
                let mut buf = Vec::with_capacity(len as usize);
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf.as_mut_ptr() as *mut _);
                buf.set_len(len as usize);
                let log_cow = String::from_utf8_lossy(&buf);
                let log = log_cow.trim_matches(char::from(0));

                gl::DeleteShader(shader);

                let mut error_msg = format!("Shader compilation failed:\n{}", log);
                if let Some(line) = parse_glsl_error_line(log) {
                    error_msg.push_str(&format_glsl_error_context(src, line));
                }
                return Err(error_msg);
            }
        }
        Ok(shader)
    }

    let vs = try_compile_shader(vertex_src, gl::VERTEX_SHADER)?;
    let fs = try_compile_shader(fragment_src, gl::FRAGMENT_SHADER)?;

    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    gl::LinkProgram(program);

    let mut success = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    if success != gl::TRUE as GLint {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = Vec::with_capacity(len as usize);
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr() as *mut _);
        buf.set_len(len as usize);
        let log = String::from_utf8_lossy(&buf);

        gl::DeleteShader(vs);
        gl::DeleteShader(fs);
        gl::DeleteProgram(program);
        return Err(format!("Shader link failed:\n{}", log));
    }

    gl::DeleteShader(vs);
    gl::DeleteShader(fs);
    Ok(program)
}

/// Essaie d’extraire le numéro de ligne de l’erreur GLSL.
/// Supporte plusieurs formats de drivers :
/// - "0:12(105): ..." (Standard/Intel)
/// - "0(12) : error ..." (NVIDIA)
/// - "ERROR: 0:12: ..." (AMD/ATI)
fn parse_glsl_error_line(log: &str) -> Option<usize> {
    let formats = [
        r"(\d+):(\d+)\((\d+)\)", // Standard/Intel, groupe 2 = ligne
        r"(\d+)\((\d+)\)\s*:",   // NVIDIA, groupe 2 = ligne
        r":\s*(\d+):(\d+):",     // AMD/ATI, groupe 2 = ligne
    ];

    for pattern in formats {
        let re = regex::Regex::new(pattern).ok()?;
        if let Some(line) = re
            .captures(log)
            .and_then(|cap| cap.get(2))
            .and_then(|m| m.as_str().parse::<usize>().ok())
        {
            return Some(line);
        }
    }
    None
}

/// Formate un extrait du code GLSL autour de la ligne fautive
fn format_glsl_error_context(src: &str, line_number: usize) -> String {
    let lines: Vec<&str> = src.lines().collect();
    let mut output = String::new();

    if lines.is_empty() || line_number == 0 {
        return output;
    }

    let context_range = 2; // nb de lignes avant/après à afficher
    output.push_str(&format!("\n🔍 Error context (line {}):\n", line_number));

    let start = line_number.saturating_sub(1 + context_range).min(lines.len());
    let end = (line_number + context_range).min(lines.len());

    for (i, line) in lines[start..end].iter().enumerate() {
        let current = start + i + 1;
        if current == line_number {
            output.push_str(&format!("> {:>3} | {}\n", current, line));
        } else {
            output.push_str(&format!("  {:>3} | {}\n", current, line));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glsl_error_line() {
        // Standard/Intel
        assert_eq!(
            parse_glsl_error_line("0:12(105): error: undefined variable"),
            Some(12)
        );
        // NVIDIA
        assert_eq!(
            parse_glsl_error_line("0(12) : error C1000: undefined variable"),
            Some(12)
        );
        // AMD
        assert_eq!(
            parse_glsl_error_line("ERROR: 0:12: 'undefined_var' : undeclared identifier"),
            Some(12)
        );
        assert_eq!(
            parse_glsl_error_line("Error: some error without line info"),
            None
        );
        assert_eq!(parse_glsl_error_line(""), None);
    }

    #[test]
    fn test_format_glsl_error_context() {
        let src = "void main() {\n    gl_Position = vec4(0.0);\n}";
        let output = format_glsl_error_context(src, 2);
        assert!(output.contains("Error context"));
        assert!(output.contains(">   2 |     gl_Position = vec4(0.0);"));

        // hors bornes : ne panique pas
        format_glsl_error_context(src, 100);
        assert_eq!(format_glsl_error_context("", 1), "");
    }

    #[test]
    fn test_gl_debug_callback_deduplication() {
        use std::ffi::CString;

        // Use a unique ID for this test to avoid collision
        let id = 0x12345678;
        let msg = CString::new("Test debug message").unwrap();

        gl_debug_callback(
            gl::DEBUG_SOURCE_APPLICATION,
            gl::DEBUG_TYPE_ERROR,
            id,
            gl::DEBUG_SEVERITY_HIGH,
            0,
            msg.as_ptr(),
            std::ptr::null_mut(),
        );

        {
            let logged = LOGGED_IDS.lock().unwrap();
            assert!(logged.contains(&id));
        }
        {
            let counts = MESSAGE_COUNT.lock().unwrap();
            assert_eq!(counts.get(&id), Some(&1));
        }

        // Second call - should return early due to deduplication
        gl_debug_callback(
            gl::DEBUG_SOURCE_APPLICATION,
            gl::DEBUG_TYPE_ERROR,
            id,
            gl::DEBUG_SEVERITY_HIGH,
            0,
            msg.as_ptr(),
            std::ptr::null_mut(),
        );

        {
            let counts = MESSAGE_COUNT.lock().unwrap();
            assert_eq!(counts.get(&id), Some(&1));
        }
    }
}
