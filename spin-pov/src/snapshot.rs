use nalgebra::{
    Point3,
    Vector3,
};

use crate::Error;

/// Borrowed view of one simulation snapshot.
///
/// Coordinates and spins are flat `[x0, y0, z0, x1, y1, z1, ...]` arrays,
/// index-aligned with the per-atom material indices.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    coordinates: &'a [f64],
    spins: &'a [f64],
    materials: &'a [u32],
}

impl<'a> Snapshot<'a> {
    /// Creates a snapshot of `materials.len()` atoms. The coordinate and spin
    /// arrays must hold exactly three values per atom.
    pub fn new(
        coordinates: &'a [f64],
        spins: &'a [f64],
        materials: &'a [u32],
    ) -> Result<Self, Error> {
        let num_atoms = materials.len();
        let num_values = vector_values(num_atoms, coordinates)?;
        check_length("coordinates", coordinates, num_values, num_atoms, false)?;
        check_length("spins", spins, num_values, num_atoms, false)?;

        Ok(Self {
            coordinates,
            spins,
            materials,
        })
    }

    /// Creates a snapshot of the first `num_atoms` atoms. Longer arrays are
    /// allowed, e.g. when the host keeps preallocated buffers.
    pub fn with_num_atoms(
        num_atoms: usize,
        coordinates: &'a [f64],
        spins: &'a [f64],
        materials: &'a [u32],
    ) -> Result<Self, Error> {
        let num_values = vector_values(num_atoms, coordinates)?;
        check_length("coordinates", coordinates, num_values, num_atoms, true)?;
        check_length("spins", spins, num_values, num_atoms, true)?;
        check_length("materials", materials, num_atoms, num_atoms, true)?;

        Ok(Self {
            coordinates: &coordinates[..num_values],
            spins: &spins[..num_values],
            materials: &materials[..num_atoms],
        })
    }

    pub fn num_atoms(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn position(&self, atom: usize) -> Point3<f64> {
        let c = &self.coordinates[3 * atom..3 * atom + 3];
        Point3::new(c[0], c[1], c[2])
    }

    pub fn spin(&self, atom: usize) -> Vector3<f64> {
        let s = &self.spins[3 * atom..3 * atom + 3];
        Vector3::new(s[0], s[1], s[2])
    }

    pub fn material(&self, atom: usize) -> u32 {
        self.materials[atom]
    }

    /// Atoms in storage order.
    pub fn atoms(self) -> impl Iterator<Item = Atom> + 'a {
        (0..self.num_atoms()).map(move |atom| {
            Atom {
                material: self.material(atom),
                position: self.position(atom),
                spin: self.spin(atom),
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Atom {
    pub material: u32,
    pub position: Point3<f64>,
    pub spin: Vector3<f64>,
}

/// Number of values in the per-atom vector arrays. An atom count whose
/// arrays couldn't exist in memory is reported against the coordinates.
fn vector_values(num_atoms: usize, coordinates: &[f64]) -> Result<usize, Error> {
    num_atoms
        .checked_mul(3)
        .ok_or(Error::SnapshotLength {
            array: "coordinates",
            num_atoms,
            expected: usize::MAX,
            len: coordinates.len(),
        })
}

fn check_length<T>(
    array: &'static str,
    values: &[T],
    expected: usize,
    num_atoms: usize,
    allow_longer: bool,
) -> Result<(), Error> {
    let len = values.len();
    if len == expected || (allow_longer && len > expected) {
        Ok(())
    }
    else {
        Err(Error::SnapshotLength {
            array,
            num_atoms,
            expected,
            len,
        })
    }
}
