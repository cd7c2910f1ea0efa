use cgmath::Point3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The chunk at the given chunk coordinate has not been loaded. This is never the same thing
    /// as the chunk being full of air.
    #[error("Chunk not loaded: {} {} {}", .0.x, .0.y, .0.z)]
    ChunkNotLoaded(Point3<i64>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = WorldError::ChunkNotLoaded(Point3::new(-1, 0, 7));
        assert_eq!(err.to_string(), "Chunk not loaded: -1 0 7");
    }
}
