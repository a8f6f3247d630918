mod r#ref;

pub use r#ref::Ref;
