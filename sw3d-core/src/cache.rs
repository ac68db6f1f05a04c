/// Parameter-keyed memoization for generated meshes
use std::fmt::Debug;

use tracing::debug;

use crate::geometry::Mesh;

/// Holds the last generated mesh together with the parameters it was built from.
///
/// The driver owns the cache; generators stay pure.
#[derive(Debug, Clone)]
pub struct MeshCache<P> {
    entry: Option<(P, Mesh)>,
    builds: usize,
}

impl<P: PartialEq + Clone + Debug> MeshCache<P> {
    pub fn new() -> Self {
        Self {
            entry: None,
            builds: 0,
        }
    }

    /// Return the cached mesh when `params` equal the last-built parameters,
    /// otherwise rebuild it with `build`.
    pub fn get_or_build(&mut self, params: &P, build: impl FnOnce(&P) -> Mesh) -> &Mesh {
        if !matches!(&self.entry, Some((cached, _)) if cached == params) {
            self.entry = None;
        }

        let (_, mesh) = self.entry.get_or_insert_with(|| {
            let mesh = build(params);
            debug!(
                ?params,
                vertices = mesh.vertex_count(),
                faces = mesh.face_count(),
                "regenerated mesh"
            );
            self.builds += 1;
            (params.clone(), mesh)
        });
        mesh
    }

    /// The cached mesh, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        self.entry.as_ref().map(|(_, mesh)| mesh)
    }

    /// How many times a mesh has been generated.
    pub fn builds(&self) -> usize {
        self.builds
    }
}

impl<P: PartialEq + Clone + Debug> Default for MeshCache<P> {
    fn default() -> Self {
        Self::new()
    }
}
