pub mod intent_bus;
pub mod settings_engine;
pub mod url_resolver;
