#[allow(dead_code)]
pub mod operation {
    pub type Definition = graphql_parser::query::Definition<'static, String>;
    pub type Directive = graphql_parser::query::Directive<'static, String>;
    pub type Document = graphql_parser::query::Document<'static, String>;
    pub type Field = graphql_parser::query::Field<'static, String>;
    pub type FragmentDefinition = graphql_parser::query::FragmentDefinition<'static, String>;
    pub type FragmentSpread = graphql_parser::query::FragmentSpread<'static, String>;
    pub type InlineFragment = graphql_parser::query::InlineFragment<'static, String>;
    pub type Mutation = graphql_parser::query::Mutation<'static, String>;
    pub type OperationDefinition = graphql_parser::query::OperationDefinition<'static, String>;
    pub type Query = graphql_parser::query::Query<'static, String>;
    pub type Selection = graphql_parser::query::Selection<'static, String>;
    pub type SelectionSet = graphql_parser::query::SelectionSet<'static, String>;
    pub type Subscription = graphql_parser::query::Subscription<'static, String>;
    pub type TypeCondition = graphql_parser::query::TypeCondition<'static, String>;

    pub type ParseError = graphql_parser::query::ParseError;

    pub fn parse(query_src: &str) -> Result<Document, ParseError> {
        Ok(graphql_parser::query::parse_query::<String>(query_src)?.into_static())
    }

    /// Builds an empty [`SelectionSet`] with no meaningful source span. Used
    /// for nodes synthesized by the rewriter.
    pub fn empty_selection_set() -> SelectionSet {
        SelectionSet {
            span: (super::AstPos::default(), super::AstPos::default()),
            items: vec![],
        }
    }
}

pub type AstPos = graphql_parser::Pos;
pub type Value = graphql_parser::query::Value<'static, String>;
