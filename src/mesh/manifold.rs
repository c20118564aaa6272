//! Watertightness: checking for open edges and welding the seams a
//! polygon-soup boolean leaves behind.

use crate::float_types::Real;
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

impl<S: Clone> Mesh<S> {
    /// Checks if the Mesh object is manifold
    ///
    /// ### Returns
    /// Returns `true` if every edge appears exactly 2 times
    ///
    /// ### Notes:
    /// - Uses a `QUANTIZATION_FACTOR` for `Real` coordinates
    /// - An empty mesh has no edges and counts as manifold
    pub fn is_manifold(&self) -> bool {
        self.open_edge_count() == 0
    }

    /// Number of (quantized) edges of the triangulated mesh that are not
    /// shared by exactly two triangles.
    pub fn open_edge_count(&self) -> usize {
        const QUANTIZATION_FACTOR: Real = 1e7;

        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        struct QuantizedPoint(i64, i64, i64);

        fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
            QuantizedPoint(
                (p.x * QUANTIZATION_FACTOR).round() as i64,
                (p.y * QUANTIZATION_FACTOR).round() as i64,
                (p.z * QUANTIZATION_FACTOR).round() as i64,
            )
        }

        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

        for tri in self.polygons.iter().flat_map(Polygon::triangulate) {
            for (i0, i1) in [(0, 1), (1, 2), (2, 0)] {
                let p0 = quantize_point(&tri[i0].pos);
                let p1 = quantize_point(&tri[i1].pos);

                // (p0, p1) and (p1, p0) are the same edge
                let key = if p0 < p1 { (p0, p1) } else { (p1, p0) };
                *edge_counts.entry(key).or_insert(0) += 1;
            }
        }

        edge_counts.values().filter(|&&count| count != 2).count()
    }

    /// Close the seams between neighboring faces.
    ///
    /// A boolean difference splits a face wherever a cutting plane crosses
    /// it, but the face on the other side of a shared edge is only split if
    /// the same plane crosses it too. The shared edge then has a vertex on
    /// one side and none on the other (a T-junction) and the surface is open
    /// there. This pass:
    ///
    /// 1. merges vertices closer than `tolerance`,
    /// 2. drops faces narrower than `tolerance` (after merging they only
    ///    cover a crack that step 3 closes),
    /// 3. inserts into every edge each remaining vertex lying on it.
    ///
    /// Faces keep their plane and metadata. Inserted vertices lie on straight
    /// stretches of the boundary, which [`Polygon::triangulate`] handles.
    pub fn weld_t_junctions(&self, tolerance: Real) -> Mesh<S> {
        let mut welder = Welder::new(tolerance);

        let mut faces: Vec<(&Polygon<S>, Vec<(usize, Vector3<Real>)>)> = Vec::new();
        for poly in &self.polygons {
            let mut ring: Vec<(usize, Vector3<Real>)> = poly
                .vertices
                .iter()
                .map(|v| (welder.insert(v.pos), v.normal))
                .collect();
            ring.dedup_by_key(|&mut (index, _)| index);
            while ring.len() > 1 && ring.first().map(|f| f.0) == ring.last().map(|l| l.0) {
                ring.pop();
            }
            if ring.len() >= 3 && !welder.is_sliver(&ring) {
                faces.push((poly, ring));
            }
        }

        // Only vertices of surviving faces may split an edge
        let mut candidates: Vec<usize> = faces
            .iter()
            .flat_map(|(_, ring)| ring.iter().map(|&(index, _)| index))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();
        candidates.sort_by(|&a, &b| {
            welder.points[a]
                .x
                .total_cmp(&welder.points[b].x)
                .then(a.cmp(&b))
        });

        let mut splits: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        let mut polygons = Vec::with_capacity(faces.len());

        for (poly, ring) in faces {
            let normal = poly.plane.normal();
            let mut vertices = Vec::with_capacity(ring.len());

            for (i, &(start, start_normal)) in ring.iter().enumerate() {
                let end = ring[(i + 1) % ring.len()].0;
                vertices.push(Vertex::new(welder.points[start], start_normal));

                let key = (start.min(end), start.max(end));
                let mut on_edge = splits
                    .entry(key)
                    .or_insert_with(|| welder.points_on_segment(key.0, key.1, &candidates))
                    .clone();
                if start > end {
                    on_edge.reverse();
                }
                for index in on_edge {
                    if ring.iter().all(|&(other, _)| other != index) {
                        vertices.push(Vertex::new(welder.points[index], normal));
                    }
                }
            }

            polygons.push(Polygon::with_plane(
                vertices,
                poly.plane.clone(),
                poly.metadata.clone(),
            ));
        }

        Mesh::from_polygons(&polygons)
    }
}

/// Spatial hash merging points that lie within `tolerance` of each other.
struct Welder {
    tolerance: Real,
    points: Vec<Point3<Real>>,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl Welder {
    fn new(tolerance: Real) -> Self {
        Self {
            tolerance,
            points: Vec::new(),
            cells: HashMap::new(),
        }
    }

    fn cell(&self, p: &Point3<Real>) -> (i64, i64, i64) {
        (
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
            (p.z / self.tolerance).floor() as i64,
        )
    }

    /// Index of the earliest stored point within tolerance of `p`, storing
    /// `p` if there is none.
    fn insert(&mut self, p: Point3<Real>) -> usize {
        let (cx, cy, cz) = self.cell(&p);
        let mut found: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &index in bucket {
                        if (self.points[index] - p).norm() <= self.tolerance
                            && found.is_none_or(|f| index < f)
                        {
                            found = Some(index);
                        }
                    }
                }
            }
        }
        if let Some(index) = found {
            return index;
        }

        let index = self.points.len();
        self.points.push(p);
        self.cells.entry((cx, cy, cz)).or_default().push(index);
        index
    }

    /// `true` when the face is narrower than the tolerance everywhere,
    /// measured as twice its area over its longest edge.
    fn is_sliver(&self, ring: &[(usize, Vector3<Real>)]) -> bool {
        let n = ring.len();
        let mut doubled_area = Vector3::zeros();
        let mut longest: Real = 0.0;
        for i in 0..n {
            let a = self.points[ring[i].0].coords;
            let b = self.points[ring[(i + 1) % n].0].coords;
            doubled_area += a.cross(&b);
            longest = longest.max((b - a).norm());
        }
        longest <= 0.0 || doubled_area.norm() / longest < self.tolerance
    }

    /// Candidates lying on the open segment `start`..`end`, ordered from
    /// `start` towards `end`. `candidates` must be sorted by x.
    fn points_on_segment(&self, start: usize, end: usize, candidates: &[usize]) -> Vec<usize> {
        let a = self.points[start];
        let b = self.points[end];
        let dir = b - a;
        let length = dir.norm();
        if length <= self.tolerance {
            return Vec::new();
        }

        let lo = a.x.min(b.x) - self.tolerance;
        let hi = a.x.max(b.x) + self.tolerance;
        let first = candidates.partition_point(|&i| self.points[i].x < lo);

        let mut hits: Vec<(Real, usize)> = candidates[first..]
            .iter()
            .take_while(|&&i| self.points[i].x <= hi)
            .filter(|&&i| i != start && i != end)
            .filter_map(|&i| {
                let offset = self.points[i] - a;
                let along = offset.dot(&dir) / length;
                if along <= self.tolerance || along >= length - self.tolerance {
                    return None;
                }
                let off_line = (offset - dir * (along / length)).norm();
                (off_line <= self.tolerance).then_some((along, i))
            })
            .collect();

        hits.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
        hits.into_iter().map(|(_, i)| i).collect()
    }
}
