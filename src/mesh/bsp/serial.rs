//! Serial implementation of BSP operations

use crate::mesh::bsp::node::Node;
use crate::mesh::bsp::traits::{BalancedSplittingStrategy, BspOps, SplittingPlaneStrategy};
use crate::mesh::plane::FRONT;
use crate::mesh::polygon::Polygon;
use std::marker::PhantomData;

/// Serial implementation of BSP operations
pub struct SerialBspOps<S: Clone, SP: SplittingPlaneStrategy<S> = BalancedSplittingStrategy> {
    splitting_strategy: SP,
    _phantom: PhantomData<S>,
}

impl<S: Clone> SerialBspOps<S, BalancedSplittingStrategy> {
    pub fn new() -> Self {
        Self::with_strategy(BalancedSplittingStrategy::default())
    }
}

impl<S: Clone> Default for SerialBspOps<S, BalancedSplittingStrategy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone, SP: SplittingPlaneStrategy<S>> SerialBspOps<S, SP> {
    pub const fn with_strategy(strategy: SP) -> Self {
        Self {
            splitting_strategy: strategy,
            _phantom: PhantomData,
        }
    }
}

impl<S: Clone, SP: SplittingPlaneStrategy<S>> BspOps<S> for SerialBspOps<S, SP> {
    fn invert(&self, node: &mut Node<S>) {
        // Use iterative approach with a stack
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            current.polygons.iter_mut().for_each(Polygon::flip);
            if let Some(ref mut plane) = current.plane {
                plane.flip();
            }

            std::mem::swap(&mut current.front, &mut current.back);

            if let Some(ref mut front) = current.front {
                stack.push(front.as_mut());
            }
            if let Some(ref mut back) = current.back {
                stack.push(back.as_mut());
            }
        }
    }

    fn clip_polygons(&self, node: &Node<S>, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let Some(plane) = node.plane.as_ref() else {
            return polygons.to_vec();
        };

        let mut front_polys = Vec::with_capacity(polygons.len());
        let mut back_polys = Vec::with_capacity(polygons.len());

        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);

            for coplanar_poly in coplanar_front.into_iter().chain(coplanar_back) {
                if plane.orient_plane(&coplanar_poly.plane) == FRONT {
                    front_parts.push(coplanar_poly);
                } else {
                    back_parts.push(coplanar_poly);
                }
            }

            front_polys.append(&mut front_parts);
            back_polys.append(&mut back_parts);
        }

        let mut result = match &node.front {
            Some(front_node) => self.clip_polygons(front_node, &front_polys),
            None => front_polys,
        };

        // Without a back subtree the back half-space is solid: drop those pieces.
        if let Some(back_node) = &node.back {
            result.extend(self.clip_polygons(back_node, &back_polys));
        }

        result
    }

    fn clip_to(&self, node: &mut Node<S>, bsp: &Node<S>) {
        node.polygons = self.clip_polygons(bsp, &node.polygons);

        if let Some(ref mut front) = node.front {
            self.clip_to(front, bsp);
        }
        if let Some(ref mut back) = node.back {
            self.clip_to(back, bsp);
        }
    }

    fn all_polygons(&self, node: &Node<S>) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![node];

        while let Some(current) = stack.pop() {
            result.extend_from_slice(&current.polygons);
            stack.extend(
                [&current.front, &current.back]
                    .into_iter()
                    .filter_map(|child| child.as_deref()),
            );
        }
        result
    }

    fn build(&self, node: &mut Node<S>, polygons: &[Polygon<S>]) {
        if polygons.is_empty() {
            return;
        }

        let plane = node
            .plane
            .get_or_insert_with(|| self.splitting_strategy.pick_best_splitting_plane(polygons))
            .clone();

        let mut front = Vec::with_capacity(polygons.len() / 2);
        let mut back = Vec::with_capacity(polygons.len() / 2);

        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);

            node.polygons.extend(coplanar_front);
            node.polygons.extend(coplanar_back);
            front.append(&mut front_parts);
            back.append(&mut back_parts);
        }

        if !front.is_empty() {
            let child = node.front.get_or_insert_with(|| Box::new(Node::new()));
            self.build(child, &front);
        }

        if !back.is_empty() {
            let child = node.back.get_or_insert_with(|| Box::new(Node::new()));
            self.build(child, &back);
        }
    }
}
