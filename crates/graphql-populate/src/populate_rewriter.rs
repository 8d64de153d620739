use crate::ast;
use crate::fragment_plan::FragmentPlan;
use crate::operation::OperationKind;
use crate::schema::SchemaIndex;
use crate::selection::SelectionsByType;
use crate::selection::TypeSelection;
use crate::selection_extractor;
use crate::selection_extractor::SelectionLowering;
use crate::PopulateOptions;

/// Replaces every `@populate` marker in a document with fragment spreads that
/// select what has been observed for the marked field's return type.
///
/// For a field returning an object type the field gets one spread of a
/// fragment on that type. For a field returning an interface or union it gets
/// one `... on Implementer { ...ImplementerFragment }` per implementer that
/// anything is known about. The fragments themselves are appended to the end
/// of the document.
///
/// Rewriting never fails. A marker whose field or type can't be resolved, or
/// whose type has nothing recorded yet, is still removed and leaves the field
/// without a synthesized selection.
#[derive(Clone, Copy, Debug)]
pub struct PopulateRewriter<'a> {
    options: &'a PopulateOptions,
    schema: &'a SchemaIndex,
    selections: &'a SelectionsByType,
}
impl<'a> PopulateRewriter<'a> {
    pub fn new(
        schema: &'a SchemaIndex,
        selections: &'a SelectionsByType,
        options: &'a PopulateOptions,
    ) -> Self {
        Self {
            options,
            schema,
            selections,
        }
    }

    pub fn contains_marker(&self, document: &ast::operation::Document) -> bool {
        document.definitions.iter().any(|def| match def {
            ast::operation::Definition::Operation(op_def) =>
                self.selection_set_contains_marker(operation_parts(op_def).1),
            ast::operation::Definition::Fragment(frag_def) =>
                self.selection_set_contains_marker(&frag_def.selection_set),
        })
    }

    pub fn rewrite(&self, document: &ast::operation::Document) -> ast::operation::Document {
        if !self.contains_marker(document) {
            return document.clone();
        }

        let mut plan = self.plan_for(document);
        let mut definitions = Vec::with_capacity(document.definitions.len());
        for def in &document.definitions {
            definitions.push(match def {
                ast::operation::Definition::Operation(op_def) =>
                    ast::operation::Definition::Operation(
                        self.rewrite_operation(op_def, &mut plan),
                    ),

                ast::operation::Definition::Fragment(frag_def) => {
                    let ast::operation::TypeCondition::On(type_name) = &frag_def.type_condition;
                    ast::operation::Definition::Fragment(ast::operation::FragmentDefinition {
                        position: frag_def.position,
                        name: frag_def.name.clone(),
                        type_condition: frag_def.type_condition.clone(),
                        directives: frag_def.directives.clone(),
                        selection_set: self.rewrite_selection_set(
                            Some(type_name.as_str()),
                            &frag_def.selection_set,
                            &mut plan,
                        ),
                    })
                },
            });
        }

        log::debug!(
            "Populated document with fragments: [{}].",
            plan.generated_names().collect::<Vec<_>>().join(", "),
        );
        definitions.extend(plan.into_definitions());
        ast::operation::Document { definitions }
    }

    /// Registers the document's own fragments: all of their names are taken,
    /// and the ones without markers may be reused as-is.
    fn plan_for(&self, document: &ast::operation::Document) -> FragmentPlan {
        let fragments = selection_extractor::fragment_definitions(document);
        let mut plan = FragmentPlan::new(self.options.fragment_suffix.as_str());

        for def in &document.definitions {
            let ast::operation::Definition::Fragment(frag_def) = def else {
                continue;
            };
            let ast::operation::TypeCondition::On(type_name) = &frag_def.type_condition;

            if self.selection_set_contains_marker(&frag_def.selection_set)
                || !self.schema.has_type(type_name) {
                plan.reserve_name(frag_def.name.as_str());
                continue;
            }

            let mut lowering = SelectionLowering::new(self.schema, &fragments);
            let selection = lowering.lower(type_name, &frag_def.selection_set);
            plan.add_reusable(frag_def.name.as_str(), type_name.as_str(), selection);
        }

        plan
    }

    fn rewrite_operation(
        &self,
        op_def: &ast::operation::OperationDefinition,
        plan: &mut FragmentPlan,
    ) -> ast::operation::OperationDefinition {
        use ast::operation::OperationDefinition;

        let (kind, selection_set) = operation_parts(op_def);
        let root_type = self.schema.root_type(kind);
        if root_type.is_none() {
            log::debug!("Schema has no {kind:?} root type; markers will be dropped unpopulated.");
        }
        let selection_set = self.rewrite_selection_set(root_type, selection_set, plan);

        match op_def {
            OperationDefinition::SelectionSet(_) => OperationDefinition::SelectionSet(selection_set),
            OperationDefinition::Query(query) => OperationDefinition::Query(ast::operation::Query {
                position: query.position,
                name: query.name.clone(),
                variable_definitions: query.variable_definitions.clone(),
                directives: query.directives.clone(),
                selection_set,
            }),
            OperationDefinition::Mutation(mutation) => OperationDefinition::Mutation(ast::operation::Mutation {
                position: mutation.position,
                name: mutation.name.clone(),
                variable_definitions: mutation.variable_definitions.clone(),
                directives: mutation.directives.clone(),
                selection_set,
            }),
            OperationDefinition::Subscription(subscription) => OperationDefinition::Subscription(ast::operation::Subscription {
                position: subscription.position,
                name: subscription.name.clone(),
                variable_definitions: subscription.variable_definitions.clone(),
                directives: subscription.directives.clone(),
                selection_set,
            }),
        }
    }

    fn rewrite_selection_set(
        &self,
        parent_type: Option<&str>,
        selection_set: &ast::operation::SelectionSet,
        plan: &mut FragmentPlan,
    ) -> ast::operation::SelectionSet {
        let mut items = Vec::with_capacity(selection_set.items.len());
        for item in &selection_set.items {
            items.push(match item {
                ast::operation::Selection::Field(field) =>
                    ast::operation::Selection::Field(
                        self.rewrite_field(parent_type, field, plan),
                    ),

                ast::operation::Selection::InlineFragment(inline_frag) => {
                    let condition = match &inline_frag.type_condition {
                        Some(ast::operation::TypeCondition::On(condition)) => Some(condition.as_str()),
                        None => parent_type,
                    };
                    ast::operation::Selection::InlineFragment(ast::operation::InlineFragment {
                        position: inline_frag.position,
                        type_condition: inline_frag.type_condition.clone(),
                        directives: inline_frag.directives.clone(),
                        selection_set: self.rewrite_selection_set(
                            condition,
                            &inline_frag.selection_set,
                            plan,
                        ),
                    })
                },

                ast::operation::Selection::FragmentSpread(_) => item.clone(),
            });
        }

        ast::operation::SelectionSet {
            span: selection_set.span,
            items,
        }
    }

    fn rewrite_field(
        &self,
        parent_type: Option<&str>,
        field: &ast::operation::Field,
        plan: &mut FragmentPlan,
    ) -> ast::operation::Field {
        let return_type = parent_type.and_then(|parent_type| {
            self.schema.field_return_type(parent_type, &field.name)
        });
        let mut selection_set = self.rewrite_selection_set(return_type, &field.selection_set, plan);

        let directives: Vec<ast::operation::Directive> = field.directives.iter()
            .filter(|directive| !self.is_marker(directive))
            .cloned()
            .collect();
        let is_marked = directives.len() != field.directives.len();

        if is_marked {
            match return_type {
                Some(return_type) =>
                    selection_set.items.extend(self.populate(return_type, plan)),
                None => log::debug!(
                    "Can't populate `{}.{}`: field is unknown to the schema.",
                    parent_type.unwrap_or("<unknown>"),
                    field.name,
                ),
            }
        }

        ast::operation::Field {
            position: field.position,
            alias: field.alias.clone(),
            name: field.name.clone(),
            arguments: field.arguments.clone(),
            directives,
            selection_set,
        }
    }

    /// Selections standing in for a marker on a field returning `type_name`.
    fn populate(&self, type_name: &str, plan: &mut FragmentPlan) -> Vec<ast::operation::Selection> {
        if !self.schema.is_abstract(type_name) {
            return match self.selections.get_non_empty(type_name) {
                Some(selection) => vec![fragment_spread(plan.fragment_for(type_name, selection))],
                None => {
                    log::debug!("Nothing has been observed for `{type_name}` yet.");
                    vec![]
                },
            };
        }

        // Only the abstract type's own fields are shared by every implementer.
        let shared = self.selections.get(type_name)
            .map(TypeSelection::unconditional_fields)
            .filter(|selection| !selection.is_empty());
        self.schema.implementers(type_name).iter()
            .filter_map(|implementer| {
                let fragment_name = match self.selections.get_non_empty(implementer) {
                    Some(selection) => plan.fragment_for(implementer, selection),
                    None => {
                        log::trace!(
                            "Nothing observed for `{implementer}`; falling back to \
                            fields shared through `{type_name}`."
                        );
                        plan.fragment_for(type_name, shared.as_ref()?)
                    },
                };
                Some(inline_fragment(implementer, vec![fragment_spread(fragment_name)]))
            })
            .collect()
    }

    fn is_marker(&self, directive: &ast::operation::Directive) -> bool {
        directive.name == self.options.directive_name
    }

    fn selection_set_contains_marker(&self, selection_set: &ast::operation::SelectionSet) -> bool {
        selection_set.items.iter().any(|item| match item {
            ast::operation::Selection::Field(field) =>
                field.directives.iter().any(|directive| self.is_marker(directive))
                    || self.selection_set_contains_marker(&field.selection_set),
            ast::operation::Selection::InlineFragment(inline_frag) =>
                self.selection_set_contains_marker(&inline_frag.selection_set),
            ast::operation::Selection::FragmentSpread(_) => false,
        })
    }
}

fn operation_parts(
    op_def: &ast::operation::OperationDefinition,
) -> (OperationKind, &ast::operation::SelectionSet) {
    use ast::operation::OperationDefinition;
    match op_def {
        OperationDefinition::SelectionSet(selection_set) => (OperationKind::Query, selection_set),
        OperationDefinition::Query(query) => (OperationKind::Query, &query.selection_set),
        OperationDefinition::Mutation(mutation) => (OperationKind::Mutation, &mutation.selection_set),
        OperationDefinition::Subscription(subscription) =>
            (OperationKind::Subscription, &subscription.selection_set),
    }
}

fn fragment_spread(fragment_name: String) -> ast::operation::Selection {
    ast::operation::Selection::FragmentSpread(ast::operation::FragmentSpread {
        position: ast::AstPos::default(),
        fragment_name,
        directives: vec![],
    })
}

fn inline_fragment(
    type_name: &str,
    items: Vec<ast::operation::Selection>,
) -> ast::operation::Selection {
    ast::operation::Selection::InlineFragment(ast::operation::InlineFragment {
        position: ast::AstPos::default(),
        type_condition: Some(ast::operation::TypeCondition::On(type_name.to_string())),
        directives: vec![],
        selection_set: ast::operation::SelectionSet {
            items,
            ..ast::operation::empty_selection_set()
        },
    })
}
