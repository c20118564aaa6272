//! STL import and export

use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use crate::triangulated::Triangulated3D;
use nalgebra::{Point3, Vector3};
use std::fmt::Write as _;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Encoding used when writing an STL file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StlFormat {
    /// 80-byte header + little-endian triangle records
    #[default]
    Binary,
    /// `solid name ... endsolid name` text
    Ascii,
}

impl FromStr for StlFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(StlFormat::Binary),
            "ascii" | "text" => Ok(StlFormat::Ascii),
            other => Err(IoError::MalformedInput(format!("unknown STL format `{other}`"))),
        }
    }
}

/// Export to ASCII STL
/// Convert a triangulated shape to an **ASCII STL** string with the given `name`.
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Binary STL has no room for a solid name; the header is left blank.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex as StlVertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| {
                let p = v.pos;
                StlVertex::new([p.x as f32, p.y as f32, p.z as f32])
            }),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl<S: Clone> Mesh<S> {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    /// Write the mesh to `path` in the requested STL encoding.
    ///
    /// The ASCII solid is named after the file stem (lossily, if the stem is
    /// not UTF-8). The parent directory must already exist.
    ///
    /// # Errors
    /// [`IoError::MalformedPath`] if `path` has no file name, or
    /// [`IoError::StdIo`] if the file cannot be written.
    pub fn export_to_file(&self, path: impl AsRef<Path>, format: StlFormat) -> Result<(), IoError> {
        let path = path.as_ref();
        if path.file_name().is_none() {
            return Err(IoError::MalformedPath(path.display().to_string()));
        }

        let bytes = match format {
            StlFormat::Binary => self.to_stl_binary()?,
            StlFormat::Ascii => {
                let name = path.file_stem().unwrap_or_default().to_string_lossy();
                self.to_stl_ascii(&name).into_bytes()
            }
        };
        debug!(path = %path.display(), ?format, bytes = bytes.len(), "writing STL");
        std::fs::write(path, &bytes)?;
        info!(path = %path.display(), "STL export complete");
        Ok(())
    }

    /// Read an ASCII or binary STL into a mesh of triangles, tagging every
    /// face with `metadata`.
    ///
    /// # Errors
    /// [`IoError::StdIo`] if `stl_io` cannot parse the data.
    pub fn from_stl(data: &[u8], metadata: Option<S>) -> Result<Mesh<S>, IoError> {
        let indexed = stl_io::read_stl(&mut Cursor::new(data))?;

        let to_point = |index: usize| -> Result<Point3<Real>, IoError> {
            let v = indexed.vertices.get(index).ok_or_else(|| {
                IoError::MalformedInput(format!("face references missing vertex {index}"))
            })?;
            Ok(Point3::new(v[0] as Real, v[1] as Real, v[2] as Real))
        };

        let mut polygons = Vec::with_capacity(indexed.faces.len());
        for face in &indexed.faces {
            let normal = Vector3::new(
                face.normal[0] as Real,
                face.normal[1] as Real,
                face.normal[2] as Real,
            );
            let vertices = face
                .vertices
                .iter()
                .map(|&i| to_point(i).map(|p| Vertex::new(p, normal)))
                .collect::<Result<Vec<_>, _>>()?;
            polygons.push(Polygon::new(vertices, metadata.clone()));
        }

        Ok(Mesh::from_polygons(&polygons))
    }
}
