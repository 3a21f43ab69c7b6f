mod properties;

pub use properties::EngineProperties;
