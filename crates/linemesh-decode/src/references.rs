//! Reference resolution.

use crate::error::{DecodeResult, Field, ReferenceError, ReferenceErrorKind};
use crate::{FieldValue, MeshDescription, ResolvedMesh};

/// Replace every reference field with the target mesh's same-named field.
///
/// Meshes are resolved in order. A reference to an earlier mesh sees that
/// mesh's field after its own resolution, so backward chains collapse. A
/// reference to the mesh itself or to a later mesh sees the field as
/// described; if that field is itself a reference (or absent) it is an
/// error rather than being chased further, which rules out cycles.
///
/// # Errors
///
/// Returns the first [`ReferenceError`] in mesh order; no partially
/// resolved collection is produced.
pub fn resolve_references(collection: &[MeshDescription]) -> DecodeResult<Vec<ResolvedMesh>> {
    let mut resolved = Vec::with_capacity(collection.len());
    for (mesh_index, mesh) in collection.iter().enumerate() {
        let mesh = resolve_mesh(collection, &resolved, mesh_index, mesh)?;
        resolved.push(mesh);
    }
    Ok(resolved)
}

fn resolve_mesh(
    collection: &[MeshDescription],
    resolved: &[ResolvedMesh],
    mesh_index: usize,
    mesh: &MeshDescription,
) -> DecodeResult<ResolvedMesh> {
    let lookup = Lookup {
        collection,
        resolved,
        mesh_index,
    };

    let vertexes = lookup.field(
        Field::Vertexes,
        &mesh.vertexes,
        |m| Some(&m.vertexes),
        |m| Some(&m.vertexes),
    )?;
    let segments = lookup.field(
        Field::Segments,
        &mesh.segments,
        |m| Some(&m.segments),
        |m| Some(&m.segments),
    )?;
    let colors = match &mesh.colors {
        Some(colors) => Some(lookup.field(
            Field::Colors,
            colors,
            |m| m.colors.as_ref(),
            |m| m.colors.as_ref(),
        )?),
        None => None,
    };

    Ok(ResolvedMesh {
        vertexes: vertexes.clone(),
        segments: segments.clone(),
        colors: colors.cloned(),
    })
}

/// Where the fields of one mesh's reference targets come from.
struct Lookup<'a> {
    collection: &'a [MeshDescription],
    /// Meshes before `mesh_index`, already resolved.
    resolved: &'a [ResolvedMesh],
    mesh_index: usize,
}

impl<'a> Lookup<'a> {
    fn field<T>(
        &self,
        field: Field,
        value: &'a FieldValue<T>,
        from_resolved: impl Fn(&'a ResolvedMesh) -> Option<&'a T>,
        from_described: impl Fn(&'a MeshDescription) -> Option<&'a FieldValue<T>>,
    ) -> Result<&'a T, ReferenceError> {
        let target = match value {
            FieldValue::Direct(value) => return Ok(value),
            FieldValue::Reference(target) => *target,
        };
        let error = |kind| ReferenceError {
            mesh_index: self.mesh_index,
            field,
            target,
            kind,
        };

        if let Some(earlier) = self.resolved.get(target) {
            return from_resolved(earlier)
                .ok_or_else(|| error(ReferenceErrorKind::UnresolvedTarget));
        }

        let target_mesh = self
            .collection
            .get(target)
            .ok_or_else(|| error(ReferenceErrorKind::OutOfRange))?;

        from_described(target_mesh)
            .and_then(FieldValue::as_direct)
            .ok_or_else(|| error(ReferenceErrorKind::UnresolvedTarget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::{ColorScheme, Colors, Selector};

    fn square() -> MeshDescription {
        MeshDescription {
            vertexes: vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 1.0],
            ]
            .into(),
            segments: vec![vec![0, 1, 2, 3, 0]].into(),
            colors: Some(
                Colors::Compressed(ColorScheme::new().with(0xFF00_00FF, [Selector::Range(0, 3)]))
                    .into(),
            ),
        }
    }

    fn reference_error(
        mesh_index: usize,
        field: Field,
        target: usize,
        kind: ReferenceErrorKind,
    ) -> DecodeError {
        DecodeError::Reference(ReferenceError {
            mesh_index,
            field,
            target,
            kind,
        })
    }

    #[test]
    fn direct_fields_pass_through() {
        let resolved = resolve_references(&[square()]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].vertexes.len(), 4);
        assert_eq!(resolved[0].segments, vec![vec![0, 1, 2, 3, 0]]);
    }

    #[test]
    fn references_copy_target_fields() {
        let diagonal = MeshDescription {
            vertexes: FieldValue::Reference(0),
            segments: vec![vec![0, 2]].into(),
            colors: None,
        };

        let resolved = resolve_references(&[square(), diagonal]).unwrap();
        assert_eq!(resolved[1].vertexes, resolved[0].vertexes);
        assert_eq!(resolved[1].segments, vec![vec![0, 2]]);
        assert_eq!(resolved[1].colors, None);
    }

    #[test]
    fn forward_references_resolve() {
        let first = MeshDescription {
            vertexes: FieldValue::Reference(1),
            segments: FieldValue::Reference(1),
            colors: Some(FieldValue::Reference(1)),
        };

        let resolved = resolve_references(&[first, square()]).unwrap();
        assert_eq!(resolved[0], resolved[1]);
    }

    #[test]
    fn out_of_range_reference_is_rejected() {
        let mut mesh = square();
        mesh.segments = FieldValue::Reference(1);

        let err = resolve_references(&[mesh]).unwrap_err();
        assert_eq!(
            err,
            reference_error(0, Field::Segments, 1, ReferenceErrorKind::OutOfRange)
        );
    }

    #[test]
    fn backward_chain_resolves() {
        let middle = MeshDescription {
            vertexes: FieldValue::Reference(0),
            segments: vec![vec![0, 1]].into(),
            colors: Some(FieldValue::Reference(0)),
        };
        let last = MeshDescription {
            vertexes: FieldValue::Reference(1),
            segments: FieldValue::Reference(1),
            colors: Some(FieldValue::Reference(1)),
        };

        let resolved = resolve_references(&[square(), middle, last]).unwrap();
        assert_eq!(resolved[2].vertexes, resolved[0].vertexes);
        assert_eq!(resolved[2].segments, vec![vec![0, 1]]);
        assert_eq!(resolved[2].colors, resolved[0].colors);
    }

    #[test]
    fn forward_chain_is_not_followed() {
        let first = MeshDescription {
            vertexes: FieldValue::Reference(1),
            segments: vec![vec![0, 1]].into(),
            colors: None,
        };
        let middle = MeshDescription {
            vertexes: FieldValue::Reference(2),
            segments: vec![vec![0, 1]].into(),
            colors: None,
        };

        let err = resolve_references(&[first, middle, square()]).unwrap_err();
        assert_eq!(
            err,
            reference_error(0, Field::Vertexes, 1, ReferenceErrorKind::UnresolvedTarget)
        );
    }

    #[test]
    fn reference_to_earlier_missing_colors_is_rejected() {
        let mut plain = square();
        plain.colors = None;
        let mut middle = square();
        middle.vertexes = FieldValue::Reference(0);
        middle.colors = None;
        let mut last = square();
        last.colors = Some(FieldValue::Reference(1));

        let err = resolve_references(&[plain, middle, last]).unwrap_err();
        assert_eq!(
            err,
            reference_error(2, Field::Colors, 1, ReferenceErrorKind::UnresolvedTarget)
        );
    }

    #[test]
    fn self_reference_is_rejected() {
        let mut mesh = square();
        mesh.vertexes = FieldValue::Reference(0);

        let err = resolve_references(&[mesh]).unwrap_err();
        assert_eq!(
            err,
            reference_error(0, Field::Vertexes, 0, ReferenceErrorKind::UnresolvedTarget)
        );
    }

    #[test]
    fn reference_to_missing_colors_is_rejected() {
        let mut plain = square();
        plain.colors = None;
        let mut borrower = square();
        borrower.colors = Some(FieldValue::Reference(0));

        let err = resolve_references(&[plain, borrower]).unwrap_err();
        assert_eq!(
            err,
            reference_error(1, Field::Colors, 0, ReferenceErrorKind::UnresolvedTarget)
        );
    }

    #[test]
    fn first_error_in_mesh_order_wins() {
        let mut a = square();
        a.colors = Some(FieldValue::Reference(7));
        let mut b = square();
        b.vertexes = FieldValue::Reference(9);

        let err = resolve_references(&[a, b]).unwrap_err();
        assert_eq!(err.mesh_index(), 0);
    }
}
