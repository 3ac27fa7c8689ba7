//! Coordinate node locator

use std::cmp::Ordering;

use log::debug;

use crate::elements::{MeshNode, SortAxes};
use crate::error::{PbcError, PbcResult};
use crate::host::HostModel;
use crate::options::MAX_ROUND_DECIMALS;

/// Fetch every node on a face region, ordered for pairing.
///
/// Nodes are sorted ascending by the first sort axis, then the second,
/// with ties broken by label. When `round_decimals` is set, coordinates are
/// rounded before sorting so opposite faces meshed with floating-point noise
/// still line up.
pub fn locate<H: HostModel + ?Sized>(
    host: &H,
    face: &str,
    axes: SortAxes,
    round_decimals: Option<u32>,
) -> PbcResult<Vec<MeshNode>> {
    if let Some(decimals) = round_decimals.filter(|&d| d > MAX_ROUND_DECIMALS) {
        return Err(PbcError::InvalidInput(format!(
            "cannot round to {} decimal places (at most {})",
            decimals, MAX_ROUND_DECIMALS
        )));
    }
    let raw = host.nodes_on_region(face)?;
    if raw.is_empty() {
        return Err(PbcError::EmptyRegion(face.to_string()));
    }

    let mut nodes: Vec<MeshNode> = raw
        .into_iter()
        .map(|(id, [x, y, z])| {
            let node = MeshNode::new(id, x, y, z, face);
            match round_decimals {
                Some(decimals) => node.rounded(decimals),
                None => node,
            }
        })
        .collect();

    nodes.sort_by(|a, b| compare(a, b, axes));

    debug!("Located {} nodes on '{}' sorted by {}", nodes.len(), face, axes);
    Ok(nodes)
}

fn compare(a: &MeshNode, b: &MeshNode, axes: SortAxes) -> Ordering {
    a.coord(axes.first())
        .total_cmp(&b.coord(axes.first()))
        .then_with(|| a.coord(axes.second()).total_cmp(&b.coord(axes.second())))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::NodeId;
    use crate::host::MeshHost;

    fn host_with_face(coords: &[(u64, [f64; 3])]) -> MeshHost {
        let mut host = MeshHost::new();
        for &(id, c) in coords {
            host.add_node(id, c).unwrap();
        }
        host.add_region("face", coords.iter().map(|&(id, _)| NodeId(id))).unwrap();
        host
    }

    #[test]
    fn test_sorted_by_both_axes() {
        let host = host_with_face(&[
            (1, [1.0, 1.0, 0.0]),
            (2, [0.0, 1.0, 0.0]),
            (3, [1.0, 0.0, 0.0]),
            (4, [0.0, 0.0, 0.0]),
        ]);
        let nodes = locate(&host, "face", SortAxes::XY, None).unwrap();
        let ids: Vec<u64> = nodes.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
        assert!(nodes.iter().all(|n| n.face == "face"));
    }

    #[test]
    fn test_ties_broken_by_label() {
        let host = host_with_face(&[
            (9, [0.0, 0.5, 1.0]),
            (3, [0.0, 0.5, 2.0]),
        ]);
        let nodes = locate(&host, "face", SortAxes::XY, None).unwrap();
        assert_eq!(nodes[0].id, NodeId(3));
        assert_eq!(nodes[1].id, NodeId(9));
    }

    #[test]
    fn test_rounding_before_sort() {
        let host = host_with_face(&[
            (1, [0.0, 1.000_000_1, 0.0]),
            (2, [0.0, 0.999_999_9, 0.0]),
        ]);
        // unrounded, node 2 sorts first
        let nodes = locate(&host, "face", SortAxes::XY, None).unwrap();
        assert_eq!(nodes[0].id, NodeId(2));
        // rounded, both sit at y = 1 and the label decides
        let nodes = locate(&host, "face", SortAxes::XY, Some(4)).unwrap();
        assert_eq!(nodes[0].id, NodeId(1));
        assert_eq!(nodes[0].coord(crate::elements::Axis::Y), 1.0);
    }

    #[test]
    fn test_rounding_precision_is_capped() {
        let host = host_with_face(&[(1, [0.0, 1.0, 0.0])]);
        assert!(locate(&host, "face", SortAxes::XY, Some(15)).is_ok());
        assert!(matches!(
            locate(&host, "face", SortAxes::XY, Some(400)),
            Err(PbcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_region() {
        let mut host = MeshHost::new();
        host.add_region("empty", Vec::new()).unwrap();
        assert!(matches!(
            locate(&host, "empty", SortAxes::YZ, None),
            Err(PbcError::EmptyRegion(name)) if name == "empty"
        ));
    }
}
