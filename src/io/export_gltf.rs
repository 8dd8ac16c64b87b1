// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! GLTF/GLB exporter

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const CHUNK_JSON: u32 = 0x4E4F_534A; // "JSON"
const CHUNK_BIN: u32 = 0x004E_4942; // "BIN\0"

/// Export mesh to GLB (binary GLTF)
pub fn export_glb(mesh: &Mesh, path: &Path) -> Result<()> {
    let (gltf, buffer_data) = create_gltf_json(mesh, None);

    let json_string = serde_json::to_string(&gltf)?;
    let json_length = align_to_four(json_string.len());
    let buffer_length = align_to_four(buffer_data.len());
    let total_length = 12 + 8 + json_length + 8 + buffer_length;

    let mut file = BufWriter::new(File::create(path).context("Failed to create GLB file")?);

    file.write_all(&GLB_MAGIC.to_le_bytes())?;
    file.write_all(&2u32.to_le_bytes())?; // version
    file.write_all(&(total_length as u32).to_le_bytes())?;

    file.write_all(&(json_length as u32).to_le_bytes())?;
    file.write_all(&CHUNK_JSON.to_le_bytes())?;
    file.write_all(json_string.as_bytes())?;
    file.write_all(&vec![b' '; json_length - json_string.len()])?;

    file.write_all(&(buffer_length as u32).to_le_bytes())?;
    file.write_all(&CHUNK_BIN.to_le_bytes())?;
    file.write_all(&buffer_data)?;
    file.write_all(&vec![0u8; buffer_length - buffer_data.len()])?;

    file.flush()?;
    Ok(())
}

/// Export mesh to GLTF with a sibling .bin file
pub fn export_gltf(mesh: &Mesh, path: &Path) -> Result<()> {
    let bin_path = path.with_extension("bin");
    let bin_name = bin_path
        .file_name()
        .and_then(|name| name.to_str())
        .context("GLTF output path has no file name")?;
    let (gltf, buffer_data) = create_gltf_json(mesh, Some(bin_name));

    let json_string = serde_json::to_string_pretty(&gltf)?;
    std::fs::write(path, json_string).context("Failed to write GLTF file")?;
    std::fs::write(&bin_path, buffer_data).context("Failed to write GLTF buffer")?;

    Ok(())
}

/// Build the GLTF document and its binary buffer. Positions and normals are
/// stored as float32, indices as uint32.
fn create_gltf_json(mesh: &Mesh, buffer_uri: Option<&str>) -> (serde_json::Value, Vec<u8>) {
    let mut buffer_data = Vec::new();

    let position_offset = buffer_data.len();
    for vertex in &mesh.vertices {
        push_vec3(&mut buffer_data, vertex.position.coords.iter());
    }
    let position_length = buffer_data.len() - position_offset;

    let normal_offset = buffer_data.len();
    for vertex in &mesh.vertices {
        push_vec3(&mut buffer_data, vertex.normal.iter());
    }
    let normal_length = buffer_data.len() - normal_offset;

    let indices_offset = buffer_data.len();
    for triangle in &mesh.triangles {
        for &index in &triangle.indices {
            buffer_data.extend_from_slice(&(index as u32).to_le_bytes());
        }
    }
    let indices_length = buffer_data.len() - indices_offset;

    let bbox = mesh.bounding_box();
    let (min, max) = if bbox.is_empty() {
        ([0.0f32; 3], [0.0f32; 3])
    } else {
        (
            [bbox.min.x as f32, bbox.min.y as f32, bbox.min.z as f32],
            [bbox.max.x as f32, bbox.max.y as f32, bbox.max.z as f32],
        )
    };

    let mut buffer = json!({ "byteLength": buffer_data.len() });
    if let Some(uri) = buffer_uri {
        buffer["uri"] = json!(uri);
    }

    let gltf = json!({
        "asset": {
            "generator": concat!("satmesh ", env!("CARGO_PKG_VERSION")),
            "version": "2.0"
        },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1 },
                "indices": 2,
                "mode": 4
            }]
        }],
        "accessors": [
            {
                "bufferView": 0,
                "byteOffset": 0,
                "componentType": 5126,
                "count": mesh.vertices.len(),
                "type": "VEC3",
                "min": min,
                "max": max
            },
            {
                "bufferView": 1,
                "byteOffset": 0,
                "componentType": 5126,
                "count": mesh.vertices.len(),
                "type": "VEC3"
            },
            {
                "bufferView": 2,
                "byteOffset": 0,
                "componentType": 5125,
                "count": mesh.triangles.len() * 3,
                "type": "SCALAR"
            }
        ],
        "bufferViews": [
            {
                "buffer": 0,
                "byteOffset": position_offset,
                "byteLength": position_length,
                "target": 34962
            },
            {
                "buffer": 0,
                "byteOffset": normal_offset,
                "byteLength": normal_length,
                "target": 34962
            },
            {
                "buffer": 0,
                "byteOffset": indices_offset,
                "byteLength": indices_length,
                "target": 34963
            }
        ],
        "buffers": [buffer]
    });

    (gltf, buffer_data)
}

fn push_vec3<'a>(buffer: &mut Vec<u8>, components: impl Iterator<Item = &'a f64>) {
    for &c in components {
        buffer.extend_from_slice(&(c as f32).to_le_bytes());
    }
}

fn align_to_four(n: usize) -> usize {
    (n + 3) & !3
}
