use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::data::{BarDataArray, ScatterItem, SurfaceDataArray};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Built-in item meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MeshShape {
    #[default]
    Bar,
    Cube,
    Pyramid,
    Cone,
    Cylinder,
    BevelBar,
    BevelCube,
    Sphere,
    Point,
}

/// Resource identifier of the mesh the host should load for a series.
///
/// Smoothed variants get a `Smooth` suffix (points have none). Without a
/// background every mesh except the sphere needs its closed `Full` variant.
#[must_use]
pub fn mesh_file_name(shape: MeshShape, smooth: bool, background_enabled: bool) -> String {
    let base = match shape {
        MeshShape::Sphere | MeshShape::Point => "sphereMesh",
        MeshShape::Bar | MeshShape::Cube => "barMesh",
        MeshShape::Pyramid => "pyramidMesh",
        MeshShape::Cone => "coneMesh",
        MeshShape::Cylinder => "cylinderMesh",
        MeshShape::BevelBar | MeshShape::BevelCube => "bevelBarMesh",
    };

    let mut name = format!("defaultMeshes/{base}");
    if smooth && shape != MeshShape::Point {
        name.push_str("Smooth");
    }
    if !background_enabled && shape != MeshShape::Sphere {
        name.push_str("Full");
    }
    name
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesDataKind {
    Bars,
    Scatter,
    Surface,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesData {
    Bars(BarDataArray),
    Scatter(Vec<ScatterItem>),
    Surface(SurfaceDataArray),
}

impl SeriesData {
    #[must_use]
    pub const fn kind(&self) -> SeriesDataKind {
        match self {
            Self::Bars(_) => SeriesDataKind::Bars,
            Self::Scatter(_) => SeriesDataKind::Scatter,
            Self::Surface(_) => SeriesDataKind::Surface,
        }
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        match self {
            Self::Bars(data) => data.rows().iter().map(Vec::len).sum(),
            Self::Scatter(items) => items.len(),
            Self::Surface(data) => data.row_count() * data.column_count(),
        }
    }
}

/// Selected bar: series plus data row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarSelection {
    pub series: SeriesId,
    pub row: usize,
    pub column: usize,
}

/// A data series plus the visual properties the renderer needs.
///
/// Data sits behind an `Arc` so renderer snapshots taken during
/// synchronization share storage with the controller until the next edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    id: SeriesId,
    name: String,
    data: Arc<SeriesData>,
    visible: bool,
    mesh: MeshShape,
    mesh_smooth: bool,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>, data: SeriesData) -> Self {
        let mesh = match data.kind() {
            SeriesDataKind::Scatter => MeshShape::Sphere,
            SeriesDataKind::Bars | SeriesDataKind::Surface => MeshShape::Bar,
        };
        Self {
            id: SeriesId::next(),
            name: name.into(),
            data: Arc::new(data),
            visible: true,
            mesh,
            mesh_smooth: false,
        }
    }

    #[must_use]
    pub fn bars(name: impl Into<String>, data: BarDataArray) -> Self {
        Self::new(name, SeriesData::Bars(data))
    }

    #[must_use]
    pub fn scatter(name: impl Into<String>, items: Vec<ScatterItem>) -> Self {
        Self::new(name, SeriesData::Scatter(items))
    }

    #[must_use]
    pub fn surface(name: impl Into<String>, data: SurfaceDataArray) -> Self {
        Self::new(name, SeriesData::Surface(data))
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: MeshShape, smooth: bool) -> Self {
        self.mesh = mesh;
        self.mesh_smooth = smooth;
        self
    }

    #[must_use]
    pub const fn id(&self) -> SeriesId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data(&self) -> &SeriesData {
        &self.data
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn mesh(&self) -> MeshShape {
        self.mesh
    }

    #[must_use]
    pub const fn is_mesh_smooth(&self) -> bool {
        self.mesh_smooth
    }

    #[must_use]
    pub fn mesh_file_name(&self, background_enabled: bool) -> String {
        mesh_file_name(self.mesh, self.mesh_smooth, background_enabled)
    }

    pub(crate) fn replace_data(&mut self, data: SeriesData) {
        self.data = Arc::new(data);
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_mesh(&mut self, mesh: MeshShape, smooth: bool) {
        self.mesh = mesh;
        self.mesh_smooth = smooth;
    }
}
