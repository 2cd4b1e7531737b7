pub trait Geometry {
    fn draw(&self);
}
