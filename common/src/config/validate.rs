pub trait Validate {
    /// Returns a human readable description of the first invalid field.
    fn validate(&self) -> Result<(), String>;
}
