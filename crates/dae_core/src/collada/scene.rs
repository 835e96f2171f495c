//! Visual-scene tree extraction.
//!
//! Walks the node hierarchy of a named `visual_scene` top-down and
//! flattens it into an id-keyed mapping of [`DaeNode`]s. Hierarchy is
//! preserved through each node's `parent` back-reference; geometry
//! references are resolved against `library_geometries` on the way.

use std::collections::HashMap;

use glam::Vec3;
use xmltree::Element;

use super::document::Document;
use super::source::{decode_source, parse_value_groups, ParamType};
use super::types::{DaeMesh, DaeNode, Value};
use super::xml;
use super::{ExtractError, ExtractResult};

const VEC3_CASTERS: [ParamType; 3] = [ParamType::Float; 3];

/// Extract the node tree of the visual scene with the given id.
///
/// An unknown scene id (or an absent `library_visual_scenes`) yields an
/// empty mapping, not an error. Fatal errors only arise from value
/// decoding; no partial mapping is returned in that case.
pub fn extract_scene(
    document: &Document,
    scene_id: &str,
) -> ExtractResult<HashMap<String, DaeNode>> {
    let mut nodes = HashMap::new();
    let root = document.root();

    let scene = xml::child(root, "library_visual_scenes")
        .and_then(|library| xml::child_with_attr(library, "visual_scene", "id", scene_id));
    let scene = match scene {
        Some(scene) => scene,
        None => {
            log::debug!("no visual scene '{}' in document", scene_id);
            return Ok(nodes);
        }
    };

    for element in xml::children(scene, "node") {
        visit_node(element, root, None, &mut nodes)?;
    }

    log::debug!("extracted {} nodes from scene '{}'", nodes.len(), scene_id);
    Ok(nodes)
}

/// Build one node, insert it, and recurse into its `node` children with
/// this node's id threaded through as their parent.
fn visit_node(
    element: &Element,
    root: &Element,
    parent: Option<&str>,
    nodes: &mut HashMap<String, DaeNode>,
) -> ExtractResult<()> {
    let node = build_node(element, root, parent)?;
    let child_parent = node.id.clone();

    match &child_parent {
        Some(id) => {
            if nodes.insert(id.clone(), node).is_some() {
                log::warn!("duplicate node id '{}'; keeping the later definition", id);
            }
        }
        None => log::warn!("scene node without an id attribute is not indexed"),
    }

    for child in xml::children(element, "node") {
        visit_node(child, root, child_parent.as_deref(), nodes)?;
    }

    Ok(())
}

fn build_node(element: &Element, root: &Element, parent: Option<&str>) -> ExtractResult<DaeNode> {
    let id = element.attributes.get("id").cloned();
    let name = element.attributes.get("name").cloned();
    let mut node = DaeNode::new(id, name);
    node.parent = parent.map(str::to_string);

    if let Some(translate) = xml::child_with_attr(element, "translate", "sid", "location") {
        if let Some(position) = parse_vec3(&xml::text(translate))? {
            node.position = position;
        }
    }

    if let Some(scale) = xml::child_with_attr(element, "scale", "sid", "scale") {
        if let Some(scale) = parse_vec3(&xml::text(scale))? {
            node.scale = scale;
        }
    }

    for rotate in xml::children(element, "rotate") {
        apply_rotation(rotate, &mut node.rotation)?;
    }

    if let Some(instance) = xml::child(element, "instance_geometry") {
        if let Some(url) = instance.attributes.get("url") {
            node.mesh = resolve_mesh(root, url.trim_start_matches('#'))?;
        }
    }

    Ok(node)
}

/// Decode a transform channel's text as one 3-float group. Empty text
/// leaves the channel at its default; malformed floats are fatal.
fn parse_vec3(text: &str) -> ExtractResult<Option<Vec3>> {
    let mut groups = parse_value_groups(text, &VEC3_CASTERS)?;
    let first = match groups.first_mut() {
        Some(first) => std::mem::take(first),
        None => return Ok(None),
    };

    let mut components = [0.0f32; 3];
    for (slot, value) in components.iter_mut().zip(first) {
        if let Value::Float(component) = value {
            *slot = component;
        }
    }
    Ok(Some(Vec3::from_array(components)))
}

/// Fold one `rotate` element into the per-axis angle triple.
///
/// COLLADA encodes each axis rotation as (axis-x, axis-y, axis-z, angle);
/// only the angle is taken, and the trailing character of the `sid`
/// decides which axis slot it updates. Any other trailing character (or
/// a missing `sid`) leaves the triple untouched, so non-axis-aligned
/// rotations are dropped rather than decomposed.
fn apply_rotation(rotate: &Element, rotation: &mut Vec3) -> ExtractResult<()> {
    let text = xml::text(rotate);
    let angle_token = match text.split_whitespace().nth(3) {
        Some(token) => token,
        None => {
            return Err(ExtractError::MalformedRotate(
                text.split_whitespace().count(),
            ))
        }
    };
    let angle: f32 = angle_token
        .parse()
        .map_err(|_| ExtractError::InvalidFloat(angle_token.to_string()))?;

    let sid = match rotate.attributes.get("sid") {
        Some(sid) => sid,
        None => return Ok(()),
    };
    match sid.chars().last().map(|axis| axis.to_ascii_lowercase()) {
        Some('x') => rotation.x = angle,
        Some('y') => rotation.y = angle,
        Some('z') => rotation.z = angle,
        _ => {}
    }

    Ok(())
}

/// Resolve an `instance_geometry` url to decoded vertex positions.
///
/// Every link in the chain (geometry id, POSITION input, source id,
/// accessor) may legitimately be missing; an unresolved reference yields
/// `None`, never an error.
fn resolve_mesh(root: &Element, geometry_id: &str) -> ExtractResult<Option<DaeMesh>> {
    let mesh = xml::child(root, "library_geometries")
        .and_then(|library| xml::child_with_attr(library, "geometry", "id", geometry_id))
        .and_then(|geometry| xml::child(geometry, "mesh"));
    let mesh = match mesh {
        Some(mesh) => mesh,
        None => {
            log::warn!("instance_geometry '#{}' does not resolve", geometry_id);
            return Ok(None);
        }
    };

    let source = xml::child(mesh, "vertices")
        .and_then(|vertices| xml::child_with_attr(vertices, "input", "semantic", "POSITION"))
        .and_then(|input| input.attributes.get("source"))
        .and_then(|url| xml::child_with_attr(mesh, "source", "id", url.trim_start_matches('#')));
    let source = match source {
        Some(source) => source,
        None => {
            log::warn!("geometry '{}' has no resolvable POSITION source", geometry_id);
            return Ok(None);
        }
    };

    Ok(decode_source(source)?.map(|decoded| DaeMesh {
        fields: decoded.fields,
        vertices: decoded.tuples,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> Document {
        let content = format!(
            r##"<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">{}</COLLADA>"##,
            body
        );
        Document::from_string(&content).unwrap()
    }

    const CUBE_GEOMETRY: &str = r##"
        <library_geometries>
          <geometry id="Cube-mesh" name="Cube">
            <mesh>
              <source id="Cube-mesh-positions">
                <float_array id="Cube-mesh-positions-array" count="9">
                  1 1 1 -1 1 1 -1 -1 1
                </float_array>
                <technique_common>
                  <accessor source="#Cube-mesh-positions-array" count="3" stride="3">
                    <param name="X" type="float"/>
                    <param name="Y" type="float"/>
                    <param name="Z" type="float"/>
                  </accessor>
                </technique_common>
              </source>
              <vertices id="Cube-mesh-vertices">
                <input semantic="POSITION" source="#Cube-mesh-positions"/>
              </vertices>
            </mesh>
          </geometry>
        </library_geometries>"##;

    #[test]
    fn test_transform_channels_decode() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene" name="Scene">
                   <node id="Cube" name="Cube">
                     <translate sid="location">1 2 3</translate>
                     <rotate sid="rotationZ">0 0 1 30</rotate>
                     <rotate sid="rotationY">0 1 0 20</rotate>
                     <rotate sid="rotationX">1 0 0 10</rotate>
                     <scale sid="scale">2 2 2</scale>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        let cube = &nodes["Cube"];
        assert_eq!(cube.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cube.rotation, Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(cube.scale, Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_missing_channels_fill_defaults() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="Empty" name="Empty"/>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        let empty = &nodes["Empty"];
        assert_eq!(empty.position, Vec3::ZERO);
        assert_eq!(empty.rotation, Vec3::ZERO);
        assert_eq!(empty.scale, Vec3::ONE);
    }

    #[test]
    fn test_unresolved_geometry_leaves_mesh_empty() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="Orphan">
                     <instance_geometry url="#missing"/>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        assert!(nodes["Orphan"].mesh.is_none());
    }

    #[test]
    fn test_mesh_resolves_through_position_input() {
        let doc = document(&format!(
            r##"{}
               <library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="Cube" name="Cube">
                     <instance_geometry url="#Cube-mesh"/>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
            CUBE_GEOMETRY
        ));

        let nodes = extract_scene(&doc, "Scene").unwrap();
        let mesh = nodes["Cube"].mesh.as_ref().unwrap();
        assert_eq!(mesh.fields, vec!["x", "y", "z"]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(
            mesh.positions().unwrap(),
            vec![
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-1.0, 1.0, 1.0),
                Vec3::new(-1.0, -1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_flat_mapping_with_parent_chain() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="A">
                     <node id="B">
                       <node id="C"/>
                     </node>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes["C"].parent.as_deref(), Some("B"));
        assert_eq!(nodes["B"].parent.as_deref(), Some("A"));
        assert!(nodes["A"].parent.is_none());
    }

    #[test]
    fn test_unknown_scene_id_is_empty() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="A"/>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        assert!(extract_scene(&doc, "OtherScene").unwrap().is_empty());
    }

    #[test]
    fn test_document_without_scene_library_is_empty() {
        let doc = document("<asset/>");
        assert!(extract_scene(&doc, "Scene").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_translate_is_fatal() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="Bad">
                     <translate sid="location">1 two 3</translate>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let err = extract_scene(&doc, "Scene").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidFloat(token) if token == "two"));
    }

    #[test]
    fn test_short_rotate_is_fatal() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="Bad">
                     <rotate sid="rotationX">1 0 0</rotate>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let err = extract_scene(&doc, "Scene").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRotate(3)));
    }

    #[test]
    fn test_non_axis_rotate_sid_is_ignored() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="Odd">
                     <rotate sid="rotation">0.5 0.5 0 45</rotate>
                     <rotate sid="rotationY">0 1 0 90</rotate>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        assert_eq!(nodes["Odd"].rotation, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_node_without_id_is_traversed_but_not_indexed() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node name="anonymous">
                     <node id="Child"/>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes["Child"].parent.is_none());
    }

    #[test]
    fn test_translate_without_location_sid_is_ignored() {
        let doc = document(
            r##"<library_visual_scenes>
                 <visual_scene id="Scene">
                   <node id="N">
                     <translate sid="offset">9 9 9</translate>
                   </node>
                 </visual_scene>
               </library_visual_scenes>"##,
        );

        let nodes = extract_scene(&doc, "Scene").unwrap();
        assert_eq!(nodes["N"].position, Vec3::ZERO);
    }
}
