use std::env;
use std::fs;
use std::path::Path;

/// Claves de `.env` que se exponen a `option_env!` (ver src/config.rs)
const CONFIG_KEYS: &[&str] = &[
    "SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "STORAGE_BUCKET",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "CACHE_TTL_MS",
    "UPLOAD_MAX_SIZE_MB",
    "UPLOAD_CACHE_CONTROL_SECONDS",
    "IMAGE_MAX_DIMENSION",
    "IMAGE_QUALITY",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let env_file = Path::new(".env");
    let contents = match fs::read_to_string(env_file) {
        Ok(contents) => contents,
        Err(_) => {
            println!("cargo:warning=Sin archivo .env: se usan los valores por defecto de AppConfig");
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        // Las variables del entorno de compilación tienen prioridad sobre .env
        if CONFIG_KEYS.contains(&key) && env::var(key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
