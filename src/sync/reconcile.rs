//! Collection reconciliation.
//!
//! One diff-and-apply pass per run:
//!
//! 1. Enumerate the collection service (failure aborts the pass).
//! 2. Delete every collection we own (name starts with `"Metrograph: "`)
//!    whose name no longer matches an eligible series, along with its tag.
//! 3. Create a collection for every eligible series not yet represented by
//!    name, resolving its tag first.
//!
//! Each create/delete is independent: failures are logged, counted, and the
//! pass moves on to the next item.

use std::collections::HashSet;

use crate::model::{COLLECTION_PREFIX, Catalog, Series, TAG_PREFIX};
use crate::sync::domain::{
    CollectionDefaults, DownstreamCollection, NewCollection, SyncError, TagRemoval,
};
use crate::sync::tagging::{create_or_get_tag, delete_tag_by_label};
use crate::sync::traits::{CollectionApi, TaggingApi};

/// Create/delete plan for one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPlan<'a> {
    /// Owned collections whose series is gone or no longer eligible
    pub to_delete: Vec<DownstreamCollection>,
    /// Eligible series without a collection, in series-id order
    pub to_create: Vec<&'a Series>,
}

/// Totals for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub collections_deleted: usize,
    pub tags_deleted: usize,
    pub collections_created: usize,
    /// Per-item failures (each also logged as a warning)
    pub failures: usize,
}

/// Whether a collection name belongs to this tool.
pub fn is_owned(name: &str) -> bool {
    name.starts_with(COLLECTION_PREFIX)
}

/// Compute which collections to delete and which series need one.
///
/// Only eligible series count as expected; collections not owned by this
/// tool never appear in the plan.
pub fn plan_collections<'a>(
    catalog: &'a Catalog,
    existing: &[DownstreamCollection],
) -> CollectionPlan<'a> {
    let eligible: Vec<&Series> = catalog.values().filter(|s| s.is_eligible()).collect();
    let expected: HashSet<String> = eligible.iter().map(|s| s.collection_name()).collect();

    let to_delete = existing
        .iter()
        .filter(|c| is_owned(&c.name) && !expected.contains(&c.name))
        .cloned()
        .collect();

    let mut present: HashSet<String> = existing.iter().map(|c| c.name.clone()).collect();
    let to_create = eligible
        .into_iter()
        .filter(|s| present.insert(s.collection_name()))
        .collect();

    CollectionPlan {
        to_delete,
        to_create,
    }
}

/// Converges the collection service onto the current catalog.
pub struct Reconciler<'a, T: ?Sized, C: ?Sized> {
    tagging: &'a T,
    collections: &'a C,
    defaults: CollectionDefaults,
}

impl<'a, T, C> Reconciler<'a, T, C>
where
    T: TaggingApi + ?Sized,
    C: CollectionApi + ?Sized,
{
    pub fn new(tagging: &'a T, collections: &'a C, defaults: CollectionDefaults) -> Self {
        Self {
            tagging,
            collections,
            defaults,
        }
    }

    /// Run one full pass.
    ///
    /// Only a failure to enumerate existing collections is returned as an
    /// error; everything else is counted in the report.
    pub async fn run(&self, catalog: &Catalog) -> Result<ReconcileReport, SyncError> {
        let existing = self.collections.list_collections().await?;
        let plan = plan_collections(catalog, &existing);

        tracing::info!(
            existing = existing.len(),
            to_delete = plan.to_delete.len(),
            to_create = plan.to_create.len(),
            "Reconciling collections"
        );

        let mut report = ReconcileReport::default();
        let kept_labels: HashSet<String> = catalog
            .values()
            .filter(|s| s.is_eligible())
            .map(|s| s.tag_label())
            .collect();

        for collection in &plan.to_delete {
            self.delete(collection, &kept_labels, &mut report).await;
        }
        for series in &plan.to_create {
            self.create(series, &mut report).await;
        }

        tracing::info!(
            deleted = report.collections_deleted,
            tags_deleted = report.tags_deleted,
            created = report.collections_created,
            failures = report.failures,
            "Reconciliation complete"
        );
        Ok(report)
    }

    async fn delete(
        &self,
        collection: &DownstreamCollection,
        kept_labels: &HashSet<String>,
        report: &mut ReconcileReport,
    ) {
        tracing::info!(
            name = %collection.name,
            id = %collection.id,
            "Deleting obsolete collection"
        );

        match self.collections.delete_collection(&collection.id).await {
            Ok(()) => report.collections_deleted += 1,
            Err(e) => {
                tracing::warn!(name = %collection.name, error = %e, "Failed to delete collection");
                report.failures += 1;
            }
        }

        let label = collection.subtype.as_str();
        if !label.strip_prefix(TAG_PREFIX).is_some_and(|id| !id.is_empty()) {
            return;
        }
        // A renamed series keeps its id, and with it the tag
        if kept_labels.contains(label) {
            tracing::debug!(label, "Tag still used by an eligible series");
            return;
        }

        match delete_tag_by_label(self.tagging, label).await {
            Ok(TagRemoval::Deleted(_)) => report.tags_deleted += 1,
            Ok(TagRemoval::Absent) => tracing::debug!(label, "Tag already absent"),
            Err(e) => {
                tracing::warn!(label, error = %e, "Failed to delete tag");
                report.failures += 1;
            }
        }
    }

    async fn create(&self, series: &Series, report: &mut ReconcileReport) {
        let label = series.tag_label();
        let tag_id = match create_or_get_tag(self.tagging, &label).await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    series = %series.id,
                    label = %label,
                    error = %e,
                    "Failed to resolve tag"
                );
                report.failures += 1;
                return;
            }
        };

        let request = NewCollection::for_series(series, tag_id, &self.defaults);
        match self.collections.create_collection(&request).await {
            Ok(created) => {
                tracing::info!(
                    name = %created.name,
                    id = %created.id,
                    valid = series.valid_movies(),
                    "Created collection"
                );
                report.collections_created += 1;
            }
            Err(e) => {
                tracing::warn!(name = %request.name, error = %e, "Failed to create collection");
                report.failures += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Film;
    use crate::sync::traits::mocks::{MockCollections, MockTagging};
    use crate::test_utils::{eligible_series, resolved_film, series_with};

    fn collection(id: &str, name: &str, subtype: &str) -> DownstreamCollection {
        DownstreamCollection {
            id: id.to_string(),
            name: name.to_string(),
            subtype: subtype.to_string(),
        }
    }

    fn catalog_of(series: Vec<Series>) -> Catalog {
        series.into_iter().map(|s| (s.id.clone(), s)).collect()
    }

    #[test]
    fn test_plan_deletes_only_owned_obsolete() {
        let catalog = catalog_of(vec![eligible_series("1", "X")]);
        let existing = vec![
            collection("a", "Metrograph: X", "metrograph-1"),
            collection("b", "Metrograph: Y", "metrograph-2"),
            collection("c", "Unrelated", ""),
        ];

        let plan = plan_collections(&catalog, &existing);

        let names: Vec<_> = plan.to_delete.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Metrograph: Y"]);
        assert!(plan.to_create.is_empty());
    }

    #[test]
    fn test_plan_treats_ineligible_series_as_absent() {
        let small = series_with(
            "2",
            "Small",
            vec![resolved_film("A", 1), resolved_film("B", 2), Film::new("C")],
        );
        let catalog = catalog_of(vec![eligible_series("1", "Big"), small]);
        let existing = vec![collection("s", "Metrograph: Small", "metrograph-2")];

        let plan = plan_collections(&catalog, &existing);

        assert_eq!(plan.to_delete.len(), 1);
        assert_eq!(plan.to_delete[0].id, "s");
        let created: Vec<_> = plan.to_create.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(created, vec!["1"]);
    }

    #[test]
    fn test_plan_skips_duplicate_series_names() {
        let catalog = catalog_of(vec![eligible_series("1", "Same"), eligible_series("2", "Same")]);
        let plan = plan_collections(&catalog, &[]);
        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_create[0].id, "1");
    }

    #[tokio::test]
    async fn test_run_converges() {
        let tagging = MockTagging::new()
            .with_tag(1, "metrograph-1")
            .with_tag(2, "metrograph-2");
        let collections = MockCollections::new()
            .with_collection("a", "Metrograph: X", "metrograph-1")
            .with_collection("b", "Metrograph: Y", "metrograph-2")
            .with_collection("c", "Unrelated", "metrograph-99");
        let catalog = catalog_of(vec![eligible_series("1", "X"), eligible_series("3", "Z")]);

        let reconciler = Reconciler::new(&tagging, &collections, CollectionDefaults::default());
        let report = reconciler.run(&catalog).await.unwrap();

        assert_eq!(report.collections_deleted, 1);
        assert_eq!(report.tags_deleted, 1);
        assert_eq!(report.collections_created, 1);
        assert_eq!(report.failures, 0);
        assert_eq!(
            collections.names(),
            vec!["Metrograph: X", "Unrelated", "Metrograph: Z"]
        );
        assert_eq!(tagging.tag_labels(), vec!["metrograph-1", "metrograph-3"]);

        let created = collections.created.lock();
        assert_eq!(created[0].subtype, "metrograph-3");
        assert_eq!(created[0].name, "Metrograph: Z");

        // A second pass has nothing left to do
        drop(created);
        let again = reconciler.run(&catalog).await.unwrap();
        assert_eq!(again, ReconcileReport::default());
    }

    #[tokio::test]
    async fn test_deletions_are_independent() {
        let tagging = MockTagging {
            fail_delete: vec![2],
            ..Default::default()
        }
        .with_tag(2, "metrograph-2")
        .with_tag(4, "metrograph-4");
        let collections = MockCollections {
            fail_delete: vec!["d".to_string()],
            ..Default::default()
        }
        .with_collection("b", "Metrograph: Y", "metrograph-2")
        .with_collection("d", "Metrograph: W", "metrograph-4");

        let reconciler = Reconciler::new(&tagging, &collections, CollectionDefaults::default());
        let report = reconciler.run(&Catalog::new()).await.unwrap();

        // b: collection deleted, tag failed. d: collection failed, tag deleted.
        assert_eq!(report.collections_deleted, 1);
        assert_eq!(report.tags_deleted, 1);
        assert_eq!(report.failures, 2);
        assert_eq!(collections.names(), vec!["Metrograph: W"]);
        assert_eq!(tagging.tag_labels(), vec!["metrograph-2"]);
    }

    #[tokio::test]
    async fn test_renamed_series_keeps_its_tag() {
        let tagging = MockTagging::new().with_tag(1, "metrograph-1");
        let collections =
            MockCollections::new().with_collection("a", "Metrograph: Old Name", "metrograph-1");
        let catalog = catalog_of(vec![eligible_series("1", "New Name")]);

        let reconciler = Reconciler::new(&tagging, &collections, CollectionDefaults::default());
        let report = reconciler.run(&catalog).await.unwrap();

        assert_eq!(report.collections_deleted, 1);
        assert_eq!(report.tags_deleted, 0);
        assert_eq!(report.collections_created, 1);
        assert_eq!(collections.created.lock()[0].tag_id, 1);
    }

    #[tokio::test]
    async fn test_subtype_without_prefix_leaves_tags_alone() {
        let tagging = MockTagging::new().with_tag(1, "custom");
        let collections = MockCollections::new().with_collection("a", "Metrograph: Gone", "custom");

        let reconciler = Reconciler::new(&tagging, &collections, CollectionDefaults::default());
        let report = reconciler.run(&Catalog::new()).await.unwrap();

        assert_eq!(report.collections_deleted, 1);
        assert_eq!(tagging.tag_labels(), vec!["custom"]);
    }

    #[tokio::test]
    async fn test_list_failure_aborts() {
        let tagging = MockTagging::new();
        let collections = MockCollections {
            fail_list: true,
            ..Default::default()
        };
        let catalog = catalog_of(vec![eligible_series("1", "X")]);

        let reconciler = Reconciler::new(&tagging, &collections, CollectionDefaults::default());
        let result = reconciler.run(&catalog).await;

        assert!(matches!(result, Err(SyncError::Network(_))));
        assert!(tagging.create_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_create_failures_continue() {
        let tagging = MockTagging {
            fail_create: vec!["metrograph-1".to_string()],
            ..Default::default()
        };
        let collections = MockCollections {
            fail_create: vec!["Metrograph: Two".to_string()],
            ..Default::default()
        };
        let catalog = catalog_of(vec![
            eligible_series("1", "One"),
            eligible_series("2", "Two"),
            eligible_series("3", "Three"),
        ]);

        let reconciler = Reconciler::new(&tagging, &collections, CollectionDefaults::default());
        let report = reconciler.run(&catalog).await.unwrap();

        assert_eq!(report.failures, 2);
        assert_eq!(report.collections_created, 1);
        assert_eq!(collections.names(), vec!["Metrograph: Three"]);
    }
}
