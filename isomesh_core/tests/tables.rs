//! Table invariant tests for isomesh_core.
//!
//! The marching cubes tables are static data; these tests pin down the
//! structural properties the scan relies on, so a corrupted entry is caught
//! before it produces a malformed mesh.

use isomesh_core::marching_cubes::{
    edge_flags, polygonise_cell_no_alloc, triangle_count, CrossingMode, MarchParams,
    CORNER_OFFSETS, EDGE_TABLE, EDGE_VERTICES, MAX_TRIANGLES_PER_CELL, TRI_SENTINEL, TRI_TABLE,
};
use isomesh_core::{CubeSample, GridIndex, Point3};

// =============================================================================
// Helpers
// =============================================================================

/// Edge mask derived from first principles: an edge is crossed iff its two
/// corners fall on different sides.
fn derived_edge_mask(code: u8) -> u16 {
    let mut mask = 0u16;
    for (edge, &(a, b)) in EDGE_VERTICES.iter().enumerate() {
        let above_a = (code >> a) & 1;
        let above_b = (code >> b) & 1;
        if above_a != above_b {
            mask |= 1 << edge;
        }
    }
    mask
}

/// Sample whose configuration code (at isovalue 0.5) equals `code`.
fn sample_for(code: u8) -> CubeSample {
    let mut values = [0.0f32; 8];
    for (i, value) in values.iter_mut().enumerate() {
        if code & (1 << i) != 0 {
            *value = 1.0;
        }
    }
    CubeSample::new(values)
}

fn params() -> MarchParams {
    MarchParams {
        isovalue: 0.5,
        resolution: 1.0,
        origin: Point3::ZERO,
        crossing: CrossingMode::Midpoint,
    }
}

// =============================================================================
// Corner and Edge Tables
// =============================================================================

#[test]
fn test_corner_offsets_are_unit_cube() {
    let mut seen = [false; 8];
    for &(x, y, z) in CORNER_OFFSETS.iter() {
        assert!(x <= 1 && y <= 1 && z <= 1);
        seen[x + 2 * y + 4 * z] = true;
    }
    assert!(seen.iter().all(|&s| s), "every unit-cube corner appears once");
}

#[test]
fn test_edges_join_adjacent_corners() {
    for (edge, &(a, b)) in EDGE_VERTICES.iter().enumerate() {
        let (ax, ay, az) = CORNER_OFFSETS[a];
        let (bx, by, bz) = CORNER_OFFSETS[b];
        let manhattan = ax.abs_diff(bx) + ay.abs_diff(by) + az.abs_diff(bz);
        assert_eq!(manhattan, 1, "edge {} does not join adjacent corners", edge);
    }
}

#[test]
fn test_edges_are_distinct() {
    for i in 0..12 {
        for j in (i + 1)..12 {
            let (a, b) = EDGE_VERTICES[i];
            let (c, d) = EDGE_VERTICES[j];
            assert!(
                !((a == c && b == d) || (a == d && b == c)),
                "edges {} and {} coincide",
                i,
                j
            );
        }
    }
}

// =============================================================================
// Configuration Tables
// =============================================================================

#[test]
fn test_edge_table_matches_corner_signs() {
    for code in 0..=255u8 {
        assert_eq!(
            EDGE_TABLE[code as usize],
            derived_edge_mask(code),
            "edge mask mismatch for code {}",
            code
        );
        assert_eq!(edge_flags(code), EDGE_TABLE[code as usize]);
    }
}

#[test]
fn test_edge_table_complement_symmetry() {
    for code in 0..=255u8 {
        assert_eq!(EDGE_TABLE[code as usize], EDGE_TABLE[(!code) as usize]);
    }
}

#[test]
fn test_tri_table_sentinel_layout() {
    for (code, row) in TRI_TABLE.iter().enumerate() {
        let used = row.iter().take_while(|&&e| e != TRI_SENTINEL).count();
        assert_eq!(used % 3, 0, "code {} has a partial triangle", code);
        assert!(used / 3 <= MAX_TRIANGLES_PER_CELL);
        assert!(
            row[used..].iter().all(|&e| e == TRI_SENTINEL),
            "code {} has entries after its sentinel",
            code
        );
        assert!(row[..used].iter().all(|&e| (0..12).contains(&e)));
    }
}

#[test]
fn test_tri_table_uses_exactly_crossed_edges() {
    for code in 0..=255u8 {
        let mut used = 0u16;
        for &e in TRI_TABLE[code as usize].iter().take_while(|&&e| e != TRI_SENTINEL) {
            used |= 1 << e;
        }
        assert_eq!(used, EDGE_TABLE[code as usize], "code {}", code);
    }
}

#[test]
fn test_no_degenerate_table_triangles() {
    for (code, row) in TRI_TABLE.iter().enumerate() {
        for tri in row.chunks_exact(3).take_while(|t| t[0] != TRI_SENTINEL) {
            assert!(
                tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2],
                "code {} repeats an edge inside one triangle",
                code
            );
        }
    }
}

#[test]
fn test_single_corner_codes_emit_one_triangle() {
    for corner in 0..8 {
        let code = 1u8 << corner;
        assert_eq!(triangle_count(code), 1, "code {}", code);
        assert_eq!(triangle_count(!code), 1, "code {}", !code);
    }
}

// =============================================================================
// Cell Polygonisation Over All Codes
// =============================================================================

#[test]
fn test_every_code_polygonises_within_cell() {
    let p = params();
    for code in 0..=255u8 {
        let sample = sample_for(code);
        assert_eq!(sample.configuration(0.5), code);

        let (triangles, count) = polygonise_cell_no_alloc(&sample, GridIndex::new(0, 0, 0), &p);
        assert_eq!(count, triangle_count(code));

        for tri in &triangles[..count] {
            for v in tri {
                assert!(v.x >= 0.0 && v.x <= 1.0);
                assert!(v.y >= 0.0 && v.y <= 1.0);
                assert!(v.z >= 0.0 && v.z <= 1.0);
            }
        }
    }
}

#[test]
fn test_midpoint_vertices_are_edge_midpoints() {
    let p = params();
    for code in 1..=254u8 {
        let (triangles, count) =
            polygonise_cell_no_alloc(&sample_for(code), GridIndex::new(0, 0, 0), &p);
        for tri in &triangles[..count] {
            for v in tri {
                // Exactly one coordinate is 0.5; the other two are 0 or 1.
                let halves = [v.x, v.y, v.z].iter().filter(|&&c| c == 0.5).count();
                let ends = [v.x, v.y, v.z]
                    .iter()
                    .filter(|&&c| c == 0.0 || c == 1.0)
                    .count();
                assert_eq!((halves, ends), (1, 2), "code {} vertex {:?}", code, v);
            }
        }
    }
}
