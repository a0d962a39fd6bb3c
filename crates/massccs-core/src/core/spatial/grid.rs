use crate::core::models::target::TargetModel;
use nalgebra::{Point3, Vector3};
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Identifier of a grid cell, in `[0, cell_count)`.
pub type CellId = usize;

/// Upper bound on the number of cells a grid may allocate.
pub const MAX_CELLS: usize = 1 << 24;
/// Upper bound on how many cells a shell may reach along one axis.
pub const MAX_SHELL_REACH: usize = 24;
/// Upper bound on cells times stencil offsets visited while building shells.
const MAX_STENCIL_WORK: usize = 1 << 31;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum GridError {
    #[error("Cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),

    #[error("Shell radii must be positive and finite with second >= first (first = {first}, second = {second})")]
    InvalidShellRadii { first: f64, second: f64 },

    #[error("Padding must be non-negative and finite, got {0}")]
    InvalidPadding(f64),

    #[error("Grid of {dims:?} cells exceeds the limit of {max} cells", max = MAX_CELLS)]
    TooManyCells { dims: [usize; 3] },

    #[error("Cells are too fine for the shell radii ({cells} cells, shell reach of {reach} cells)")]
    TooFine { cells: usize, reach: usize },
}

/// Geometry of the cell decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// Edge length of the cubic cells, in Angstroms.
    pub cell_size: f64,
    /// Radius covered by the first shell (dispersion and near electrostatics).
    pub first_radius: f64,
    /// Radius covered by the union of both shells (electrostatics only beyond the first).
    pub second_radius: f64,
    /// Margin added around the target bounding box.
    pub padding: f64,
}

impl GridSpec {
    /// Cells one dispersion cutoff wide, shells sized to both cutoffs and a
    /// margin wide enough that nothing outside the grid is within either cutoff.
    pub fn for_cutoffs(lj_cutoff: f64, coul_cutoff: f64) -> Self {
        let outer = lj_cutoff.max(coul_cutoff);
        Self {
            cell_size: lj_cutoff,
            first_radius: lj_cutoff,
            second_radius: outer,
            padding: outer,
        }
    }

    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    fn validate(&self) -> Result<(), GridError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(self.cell_size));
        }
        let radius_ok = |r: f64| r.is_finite() && r > 0.0;
        if !radius_ok(self.first_radius)
            || !radius_ok(self.second_radius)
            || self.second_radius < self.first_radius
        {
            return Err(GridError::InvalidShellRadii {
                first: self.first_radius,
                second: self.second_radius,
            });
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(GridError::InvalidPadding(self.padding));
        }
        let reach = self.shell_reach();
        if reach > MAX_SHELL_REACH {
            return Err(GridError::TooFine { cells: 0, reach });
        }
        Ok(())
    }

    /// Number of cells the outer shell extends along each axis.
    fn shell_reach(&self) -> usize {
        (self.second_radius / self.cell_size).ceil() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shell {
    First,
    Second,
}

#[derive(Debug, Clone, Default)]
struct Cell {
    atoms: Vec<usize>,
    first_shell: Vec<CellId>,
    second_shell: Vec<CellId>,
}

/// Uniform cell list over the bounding volume of a target molecule.
///
/// Every target atom belongs to exactly one cell. For each cell the ids of the
/// non-empty cells that may hold an atom closer than `first_radius` (first
/// shell) or between `first_radius` and `second_radius` (second shell) to any
/// point of the cell are precomputed, so a query only touches those lists.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    spec: GridSpec,
    origin: Point3<f64>,
    dims: [usize; 3],
    cells: Vec<Cell>,
    atom_count: usize,
}

impl SpatialGrid {
    #[instrument(skip_all, name = "spatial_grid_build", fields(atoms = target.len()))]
    pub fn build(target: &TargetModel, spec: GridSpec) -> Result<Self, GridError> {
        spec.validate()?;

        let (min, max) = target.bounding_box();
        let pad = Vector3::repeat(spec.padding);
        let origin = min - pad;
        let extent = (max + pad) - origin;

        let mut dims = [1usize; 3];
        for (k, dim) in dims.iter_mut().enumerate() {
            *dim = ((extent[k] / spec.cell_size).ceil() as usize).max(1);
        }
        let total = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .filter(|&n| n <= MAX_CELLS)
            .ok_or(GridError::TooManyCells { dims })?;

        let reach = spec.shell_reach();
        let stencil_volume = (2 * reach + 1).pow(3);
        if total.saturating_mul(stencil_volume) > MAX_STENCIL_WORK {
            return Err(GridError::TooFine {
                cells: total,
                reach,
            });
        }

        let mut grid = Self {
            spec,
            origin,
            dims,
            cells: vec![Cell::default(); total],
            atom_count: target.len(),
        };

        for (index, atom) in target.atoms().iter().enumerate() {
            let coords = grid.clamped_coords(&atom.position);
            let id = grid.linear_id(coords);
            grid.cells[id].atoms.push(index);
        }

        let stencil = grid.shell_stencil();
        debug!("Shell stencil holds {} offsets.", stencil.len());

        for id in 0..total {
            let coords = grid.coords_of(id);
            let mut first_shell = Vec::new();
            let mut second_shell = Vec::new();
            for &(offset, shell) in &stencil {
                let Some(neighbor) = grid.offset_id(coords, offset) else {
                    continue;
                };
                if grid.cells[neighbor].atoms.is_empty() {
                    continue;
                }
                match shell {
                    Shell::First => first_shell.push(neighbor),
                    Shell::Second => second_shell.push(neighbor),
                }
            }
            grid.cells[id].first_shell = first_shell;
            grid.cells[id].second_shell = second_shell;
        }

        let occupied = grid.cells.iter().filter(|c| !c.atoms.is_empty()).count();
        info!(
            "Spatial grid built: {}x{}x{} cells ({} occupied) for {} atoms, cell size {:.3} Å.",
            dims[0], dims[1], dims[2], occupied, grid.atom_count, spec.cell_size
        );

        Ok(grid)
    }

    /// Maps a position to the cell containing it, or `None` outside the grid.
    #[inline]
    pub fn index_of(&self, position: &Point3<f64>) -> Option<CellId> {
        let rel = (position - self.origin) / self.spec.cell_size;
        let mut coords = [0usize; 3];
        for k in 0..3 {
            let f = rel[k].floor();
            if !(f >= 0.0 && f < self.dims[k] as f64) {
                return None;
            }
            coords[k] = f as usize;
        }
        Some(self.linear_id(coords))
    }

    #[inline]
    pub fn contains(&self, position: &Point3<f64>) -> bool {
        self.index_of(position).is_some()
    }

    #[inline]
    pub fn first_shell_neighbors(&self, id: CellId) -> &[CellId] {
        self.cells.get(id).map_or(&[], |c| c.first_shell.as_slice())
    }

    #[inline]
    pub fn second_shell_neighbors(&self, id: CellId) -> &[CellId] {
        self.cells.get(id).map_or(&[], |c| c.second_shell.as_slice())
    }

    #[inline]
    pub fn atoms_in(&self, id: CellId) -> &[usize] {
        self.cells.get(id).map_or(&[], |c| c.atoms.as_slice())
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Number of target atoms the grid was built for.
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// Corners `(min, max)` of the indexed volume.
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        let span = Vector3::new(
            self.dims[0] as f64,
            self.dims[1] as f64,
            self.dims[2] as f64,
        ) * self.spec.cell_size;
        (self.origin, self.origin + span)
    }

    #[inline]
    fn linear_id(&self, [x, y, z]: [usize; 3]) -> CellId {
        x + self.dims[0] * (y + self.dims[1] * z)
    }

    fn coords_of(&self, id: CellId) -> [usize; 3] {
        let x = id % self.dims[0];
        let y = (id / self.dims[0]) % self.dims[1];
        let z = id / (self.dims[0] * self.dims[1]);
        [x, y, z]
    }

    fn clamped_coords(&self, position: &Point3<f64>) -> [usize; 3] {
        let rel = (position - self.origin) / self.spec.cell_size;
        let mut coords = [0usize; 3];
        for k in 0..3 {
            let f = rel[k].floor().max(0.0) as usize;
            coords[k] = f.min(self.dims[k] - 1);
        }
        coords
    }

    fn offset_id(&self, coords: [usize; 3], offset: [isize; 3]) -> Option<CellId> {
        let mut shifted = [0usize; 3];
        for k in 0..3 {
            let c = coords[k] as isize + offset[k];
            if c < 0 || c >= self.dims[k] as isize {
                return None;
            }
            shifted[k] = c as usize;
        }
        Some(self.linear_id(shifted))
    }

    /// Offsets of every cell whose closest point may lie within a shell radius
    /// of some point of the origin cell, tagged with the innermost shell it falls in.
    fn shell_stencil(&self) -> Vec<([isize; 3], Shell)> {
        let size = self.spec.cell_size;
        let reach = self.spec.shell_reach() as isize;
        let mut stencil = Vec::new();
        for dz in -reach..=reach {
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let gap = |d: isize| ((d.abs() - 1).max(0) as f64) * size;
                    let distance = (gap(dx).powi(2) + gap(dy).powi(2) + gap(dz).powi(2)).sqrt();
                    if distance <= self.spec.first_radius {
                        stencil.push(([dx, dy, dz], Shell::First));
                    } else if distance <= self.spec.second_radius {
                        stencil.push(([dx, dy, dz], Shell::Second));
                    }
                }
            }
        }
        stencil
    }
}
