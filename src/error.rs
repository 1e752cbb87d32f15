pub use breeze::BreezeError as Error;

pub type Result<T> = std::result::Result<T, Error>;
