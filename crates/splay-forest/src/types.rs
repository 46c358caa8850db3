//! Node trait definition.
//!
//! Each "pointer" is an `Option<u32>` index into a slice-backed arena. All
//! tree-manipulation functions take the arena as `&[N]` / `&mut [N]` and work
//! with indices, so a parent link is just another index and never an owning
//! reference.

/// Tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}
