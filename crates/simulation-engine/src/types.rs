/// Per-unit economics the projection runs on.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionInputs {
    pub selling_price: f64,
    pub unit_cost: f64,
    pub advertising: bool,
}
