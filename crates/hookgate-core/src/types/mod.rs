pub mod hook;
pub mod settings;

pub use hook::HookKind;
pub use settings::Settings;
