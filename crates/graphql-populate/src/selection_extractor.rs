use crate::ast;
use crate::operation::OperationKind;
use crate::schema::SchemaIndex;
use crate::selection::FieldSelection;
use crate::selection::SelectionsByType;
use crate::selection::TypeSelection;
use std::collections::HashMap;

/// Learns which fields a query or subscription document selects for each
/// type it touches.
///
/// Extraction is a pure function of the schema and one document: the result
/// is a fresh [`SelectionsByType`] that the caller merges into whatever store
/// it owns.
///
/// ```
/// use graphql_populate::ast;
/// use graphql_populate::schema::SchemaIndex;
/// use graphql_populate::SelectionExtractor;
///
/// # fn example(schema: &SchemaIndex) -> Result<(), Box<dyn std::error::Error>> {
/// let document = ast::operation::parse("{ todos { id text } }")?;
/// let observed = SelectionExtractor::new(schema).extract(&document);
/// for (type_name, selection) in observed.iter() {
///     println!("{type_name}: {:?}", selection.field_names().collect::<Vec<_>>());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SelectionExtractor<'schema> {
    schema: &'schema SchemaIndex,
}
impl<'schema> SelectionExtractor<'schema> {
    pub fn new(schema: &'schema SchemaIndex) -> Self {
        Self { schema }
    }

    pub fn extract(&self, document: &ast::operation::Document) -> SelectionsByType {
        let fragments = fragment_definitions(document);
        let mut lowering = SelectionLowering::new(self.schema, &fragments);

        for def in &document.definitions {
            let ast::operation::Definition::Operation(op_def) = def else {
                continue;
            };

            let (kind, selection_set) = match op_def {
                ast::operation::OperationDefinition::SelectionSet(selection_set) =>
                    (OperationKind::Query, selection_set),
                ast::operation::OperationDefinition::Query(query) =>
                    (OperationKind::Query, &query.selection_set),
                ast::operation::OperationDefinition::Subscription(subscription) =>
                    (OperationKind::Subscription, &subscription.selection_set),
                ast::operation::OperationDefinition::Mutation(mutation) => {
                    log::trace!(
                        "Not learning from mutation `{}`.",
                        mutation.name.as_deref().unwrap_or("<anonymous>"),
                    );
                    continue;
                },
            };

            let Some(root_type) = self.schema.root_type(kind) else {
                log::debug!("Schema has no {kind:?} root type; skipping operation.");
                continue;
            };
            lowering.lower(root_type, selection_set);
        }

        lowering.into_observed()
    }
}

pub(crate) fn fragment_definitions(
    document: &ast::operation::Document,
) -> HashMap<&str, &ast::operation::FragmentDefinition> {
    document.definitions.iter()
        .filter_map(|def| match def {
            ast::operation::Definition::Fragment(frag_def) =>
                Some((frag_def.name.as_str(), frag_def)),
            ast::operation::Definition::Operation(_) => None,
        })
        .collect()
}

/// Recursive descent from an AST selection set to a [`TypeSelection`].
///
/// Fragment spreads are expanded in place. Every field that has a selection
/// set of its own, and every type-conditioned part, is additionally recorded
/// under its type in `observed`.
pub(crate) struct SelectionLowering<'a> {
    schema: &'a SchemaIndex,
    fragments: &'a HashMap<&'a str, &'a ast::operation::FragmentDefinition>,
    observed: SelectionsByType,
    visiting: Vec<&'a str>,
}
impl<'a> SelectionLowering<'a> {
    pub(crate) fn new(
        schema: &'a SchemaIndex,
        fragments: &'a HashMap<&'a str, &'a ast::operation::FragmentDefinition>,
    ) -> Self {
        Self {
            schema,
            fragments,
            observed: SelectionsByType::new(),
            visiting: vec![],
        }
    }

    pub(crate) fn into_observed(self) -> SelectionsByType {
        self.observed
    }

    pub(crate) fn lower(
        &mut self,
        type_name: &str,
        selection_set: &'a ast::operation::SelectionSet,
    ) -> TypeSelection {
        let schema = self.schema;
        let mut selection = TypeSelection::new();

        for item in &selection_set.items {
            match item {
                ast::operation::Selection::Field(field) => {
                    let Some(return_type) = schema.field_return_type(type_name, &field.name) else {
                        log::debug!(
                            "Skipping `{type_name}.{}`: not a field known to the schema.",
                            field.name,
                        );
                        continue;
                    };

                    let field_selection =
                        if field.selection_set.items.is_empty() {
                            FieldSelection::leaf(field.name.as_str())
                        } else {
                            let nested = self.lower(return_type, &field.selection_set);
                            if nested.is_empty() {
                                // A composite field with nothing left under it
                                // can't be selected at all.
                                continue;
                            }
                            self.observed.merge(return_type, nested.clone());
                            FieldSelection::nested(field.name.as_str(), nested)
                        };

                    selection.add_field(field_selection.with_arguments(field.arguments.clone()));
                },

                ast::operation::Selection::InlineFragment(inline_frag) => {
                    let condition = match &inline_frag.type_condition {
                        Some(ast::operation::TypeCondition::On(condition)) => condition.as_str(),
                        None => type_name,
                    };
                    self.lower_conditional(
                        type_name,
                        condition,
                        &inline_frag.selection_set,
                        &mut selection,
                    );
                },

                ast::operation::Selection::FragmentSpread(spread) => {
                    let fragment_name = spread.fragment_name.as_str();
                    let Some(frag_def) = self.fragments.get(fragment_name).copied() else {
                        log::debug!("Skipping spread of undefined fragment `{fragment_name}`.");
                        continue;
                    };
                    if self.visiting.contains(&fragment_name) {
                        log::debug!("Skipping cyclic spread of fragment `{fragment_name}`.");
                        continue;
                    }

                    let ast::operation::TypeCondition::On(condition) = &frag_def.type_condition;
                    self.visiting.push(fragment_name);
                    self.lower_conditional(
                        type_name,
                        condition.as_str(),
                        &frag_def.selection_set,
                        &mut selection,
                    );
                    self.visiting.pop();
                },
            }
        }

        selection
    }

    fn lower_conditional(
        &mut self,
        type_name: &str,
        condition: &str,
        selection_set: &'a ast::operation::SelectionSet,
        into: &mut TypeSelection,
    ) {
        if !self.schema.has_type(condition) {
            log::debug!("Skipping fragment on `{condition}`: not a type known to the schema.");
            return;
        }

        let nested = self.lower(condition, selection_set);
        if nested.is_empty() {
            return;
        }

        if condition == type_name {
            into.merge(nested);
            return;
        }

        self.observed.merge(condition, nested.clone());

        // A fragment on an interface the current object type implements
        // applies unconditionally.
        let applies_unconditionally = self.schema.implementers(condition)
            .iter()
            .any(|implementer| implementer == type_name);
        if applies_unconditionally {
            into.merge(nested);
        } else {
            into.add_conditional(condition, nested);
        }
    }
}
