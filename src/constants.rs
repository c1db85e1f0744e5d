// UI Constants
pub const APP_TITLE: &str = "Tarantibot";
pub const APP_SUBTITLE: &str = "Tu asistente experto en películas de Quentin Tarantino";
pub const CATALOG_TITLE: &str = "Películas Disponibles";
pub const INPUT_PLACEHOLDER: &str = "Escribe un mensaje...";
pub const TYPING_INDICATOR: &str = "Escribiendo...";

// API Constants
pub const ASK_PATH: &str = "/ask";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Bot reply appended whenever an exchange fails, whatever the cause.
pub const FALLBACK_REPLY: &str = "Lo siento, ocurrió un error al procesar tu solicitud.";

// Environment
pub const CONFIG_PATH_ENV: &str = "TARANTIBOT_CONFIG";
pub const BACKEND_URL_ENV: &str = "TARANTIBOT_BACKEND_URL";
pub const LOG_LEVEL_ENV: &str = "TARANTIBOT_LOG_LEVEL";

/// Builds the outbound query sent when a catalog entry is picked.
pub fn catalog_query(title: &str) -> String {
    format!("Quiero saber más sobre \"{}\".", title)
}
