use super::artifact::{ArtifactError, EstimatorKind, ForestSpec, NodeSpec, TreeSpec};

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn compile(
        index: usize,
        spec: &TreeSpec,
        width: usize,
        class_count: usize,
    ) -> Result<Self, ArtifactError> {
        let malformed = |node: usize, reason: String| ArtifactError::MalformedTree {
            tree: index,
            node,
            reason,
        };

        if spec.nodes.is_empty() {
            return Err(malformed(0, "tree has no nodes".to_string()));
        }

        let mut nodes = Vec::with_capacity(spec.nodes.len());
        for (position, node) in spec.nodes.iter().enumerate() {
            let compiled = match node {
                NodeSpec::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= width {
                        return Err(malformed(
                            position,
                            format!("feature {feature} is outside the {width} transformed features"),
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(malformed(position, "threshold must be finite".to_string()));
                    }
                    // Children must come later in the node list; this also rules out cycles.
                    for child in [*left, *right] {
                        if child <= position || child >= spec.nodes.len() {
                            return Err(malformed(
                                position,
                                format!("child {child} must be a later node in this tree"),
                            ));
                        }
                    }
                    Node::Split {
                        feature: *feature,
                        threshold: *threshold,
                        left: *left,
                        right: *right,
                    }
                }
                NodeSpec::Leaf { value } => {
                    if value.len() != class_count {
                        return Err(malformed(
                            position,
                            format!("leaf has {} weights for {class_count} classes", value.len()),
                        ));
                    }
                    if value.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
                        return Err(malformed(
                            position,
                            "leaf weights must be finite and non-negative".to_string(),
                        ));
                    }
                    let total: f64 = value.iter().sum();
                    if total <= 0.0 {
                        return Err(malformed(position, "leaf weights sum to zero".to_string()));
                    }
                    Node::Leaf {
                        distribution: value.iter().map(|weight| weight / total).collect(),
                    }
                }
            };
            nodes.push(compiled);
        }

        Ok(Self { nodes })
    }

    fn leaf(&self, features: &[f64]) -> &[f64] {
        let mut current = 0;
        loop {
            match &self.nodes[current] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    current = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { distribution } => return distribution,
            }
        }
    }
}

/// Averaging ensemble of decision trees.
#[derive(Debug, Clone)]
pub(crate) struct RandomForest {
    trees: Vec<DecisionTree>,
    class_count: usize,
}

impl RandomForest {
    pub(crate) fn compile(
        spec: &ForestSpec,
        width: usize,
        class_count: usize,
    ) -> Result<Self, ArtifactError> {
        if class_count < 2 {
            return Err(ArtifactError::ClassCount {
                estimator: EstimatorKind::RandomForest,
                expected: 2,
                found: class_count,
            });
        }
        if spec.trees.is_empty() {
            return Err(ArtifactError::EmptyForest);
        }

        let trees = spec
            .trees
            .iter()
            .enumerate()
            .map(|(index, tree)| DecisionTree::compile(index, tree, width, class_count))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { trees, class_count })
    }

    /// Mean of the per-tree leaf distributions.
    pub(crate) fn probabilities(&self, features: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.class_count];
        for tree in &self.trees {
            for (total, share) in totals.iter_mut().zip(tree.leaf(features)) {
                *total += share;
            }
        }
        let tree_count = self.trees.len() as f64;
        totals.iter_mut().for_each(|total| *total /= tree_count);
        totals
    }

    /// Most probable class; ties go to the earlier class.
    pub(crate) fn predict_class(&self, features: &[f64]) -> usize {
        let probabilities = self.probabilities(features);
        let mut best = 0;
        for (index, probability) in probabilities.iter().enumerate().skip(1) {
            if *probability > probabilities[best] {
                best = index;
            }
        }
        best
    }
}
