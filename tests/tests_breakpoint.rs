//! End-to-end breakpoint-name tests: annotated selection in, name out.
//!
//! Selections are marked inline with `[|...|]` (or `[||]` for a caret); see
//! `helpers::annotated_source`.

mod helpers;

use breakname::ide::{MetadataNameError, MetadataNameSource, SyntacticNameSource};
use breakname::{SyntaxNode, TextRange};
use helpers::{assert_breakpoint_name, function_breakpoint_name};
use rstest::rstest;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

// =============================================================================
// QUALIFICATION
// =============================================================================

#[tokio::test]
async fn test_namespace_not_needed() {
    assert_breakpoint_name(
        r#"
class A
{
    void [|B|]() { }
}"#,
        Some("A.B"),
    )
    .await;
}

#[tokio::test]
async fn test_simple_namespace() {
    assert_breakpoint_name(
        r#"
namespace A
{
    class B
    {
        void [|C|]() { }
    }
}"#,
        Some("A.B.C"),
    )
    .await;
}

#[tokio::test]
async fn test_dotted_namespace() {
    assert_breakpoint_name(
        r#"
namespace A.B
{
    class C
    {
        void [|D|]() { }
    }
}"#,
        Some("A.B.C.D"),
    )
    .await;
}

#[tokio::test]
async fn test_nested_namespace() {
    assert_breakpoint_name(
        r#"
namespace A
{
    namespace B1 { }

    namespace B2
    {
        class C
        {
            void [|D|]() { }
        }
    }
}"#,
        Some("A.B2.C.D"),
    )
    .await;
}

#[tokio::test]
async fn test_nested_dotted_namespace() {
    assert_breakpoint_name(
        r#"
namespace A.B
{
    namespace C.D
    {
        class E
        {
            void [|F|]() { }
        }
    }
}"#,
        Some("A.B.C.D.E.F"),
    )
    .await;
}

#[tokio::test]
async fn test_file_scoped_namespace() {
    assert_breakpoint_name(
        r#"namespace N.M;

class C
{
    void [|D|]() { }
}
"#,
        Some("N.M.C.D"),
    )
    .await;
}

#[tokio::test]
async fn test_nested_classes() {
    assert_breakpoint_name(
        r#"
class A
{
    class B
    {
        void [|C|]() { }
    }
}"#,
        Some("A.B.C"),
    )
    .await;
}

#[tokio::test]
async fn test_struct() {
    assert_breakpoint_name(
        r#"
struct A
{
    void [|B|]() { }
}"#,
        Some("A.B"),
    )
    .await;
}

#[tokio::test]
async fn test_nested_structs() {
    assert_breakpoint_name(
        r#"
struct A
{
    struct B
    {
        void [|C|]() { }
    }
}"#,
        Some("A.B.C"),
    )
    .await;
}

#[tokio::test]
async fn test_generic_type_qualification() {
    assert_breakpoint_name(
        r#"
class A<T1, T2>
{
    void [|B|]() { }
}"#,
        Some("A<T1, T2>.B"),
    )
    .await;
}

#[tokio::test]
async fn test_interface_method() {
    assert_breakpoint_name(
        r#"
interface I
{
    void [|M|]();
}"#,
        Some("I.M"),
    )
    .await;
}

// =============================================================================
// NON-MEMBER SELECTIONS
// =============================================================================

#[tokio::test]
async fn test_namespace_identifier_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
namespace [|A|]
{
    class B
    {
        void C() { }
    }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_class_identifier_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
class [|A|]
{
    void B() { }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_field_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    int [|B|] = 3;
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_delegate_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    public delegate void [|D|](int x);
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_enum_member_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
enum E
{
    [|A|],
    B,
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_local_function_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    void B()
    {
        void [|C|]() { }
    }
}"#,
        None,
    )
    .await;
}

// =============================================================================
// SELECTION BOUNDARIES
// =============================================================================

#[tokio::test]
async fn test_zero_width_selection_at_start_of_method_name() {
    assert_breakpoint_name(
        r#"
class A
{
    void [||]B() { }
}"#,
        Some("A.B"),
    )
    .await;
}

#[tokio::test]
async fn test_zero_width_selection_at_end_of_method_name() {
    assert_breakpoint_name(
        r#"
class A
{
    void B[||]() { }
}"#,
        Some("A.B"),
    )
    .await;
}

#[tokio::test]
async fn test_zero_width_selection_inside_method_name() {
    assert_breakpoint_name(
        r#"
class A
{
    void B[||]B() { }
}"#,
        Some("A.BB"),
    )
    .await;
}

#[tokio::test]
async fn test_zero_width_selection_at_start_of_file() {
    assert_breakpoint_name("[||]class A { void B() { } }", None).await;
}

#[tokio::test]
async fn test_zero_width_selection_before_name_token() {
    // The caret after `void ` looks forward at whitespace and backward at
    // the return type; neither identifies the member
    assert_breakpoint_name(
        r#"
class A
{
    void[||] B() { }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_selection_past_end_of_method_name_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    void [|B(|]) { }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_selection_before_start_of_method_name_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    void[| B|]() { }
}"#,
        None,
    )
    .await;
}

// =============================================================================
// GENERIC METHODS
// =============================================================================

#[tokio::test]
async fn test_generic_method_name_only() {
    assert_breakpoint_name(
        r#"
class A
{
    void [|B|]<T>() { }
}"#,
        Some("A.B<T>"),
    )
    .await;
}

#[tokio::test]
async fn test_generic_method_with_type_param_list() {
    assert_breakpoint_name(
        r#"
class A
{
    void [|B<T>|]() { }
}"#,
        Some("A.B<T>"),
    )
    .await;
}

#[tokio::test]
async fn test_generic_method_partial_list() {
    // The selection may stop anywhere inside the list as long as it starts
    // inside the identifier
    assert_breakpoint_name(
        r#"
class A
{
    void [|B<|]T>() { }
}"#,
        Some("A.B<T>"),
    )
    .await;
}

#[tokio::test]
async fn test_generic_method_multiple_params() {
    assert_breakpoint_name(
        r#"
class A
{
    void [|B|]<T, U>(T t) where T : class { }
}"#,
        Some("A.B<T, U>"),
    )
    .await;
}

#[tokio::test]
async fn test_generic_method_list_only_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    void B[|<T>|]() { }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_generic_method_selection_past_list_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    void [|B<T>(|]) { }
}"#,
        None,
    )
    .await;
}

// =============================================================================
// PROPERTIES AND ACCESSORS
// =============================================================================

#[tokio::test]
async fn test_entire_property() {
    assert_breakpoint_name(
        r#"
class A
{
    int [|B|] { get; set; }
}"#,
        Some("A.B"),
    )
    .await;
}

#[tokio::test]
async fn test_entire_property_expression() {
    assert_breakpoint_name(
        r#"
class A
{
    int [|B|] => 0;
}"#,
        Some("A.B"),
    )
    .await;
}

#[rstest]
#[case("int B { [|get|]; }", Some("A.B.get"))]
#[case("int B { [|get|] => 0; }", Some("A.B.get"))]
#[case("int B { [|get|] { return 0; } }", Some("A.B.get"))]
#[case("int B { [|set|]; }", Some("A.B.set"))]
#[case("int B { [|set|] => _ = 0; }", Some("A.B.set"))]
#[case("int B { [|set|] { } }", Some("A.B.set"))]
#[case("int B { get; [|init|]; }", Some("A.B.init"))]
#[case("int B { get; private [|set|]; }", Some("A.B.set"))]
#[tokio::test]
async fn test_property_accessors(#[case] member: &str, #[case] expected: Option<&str>) {
    let annotated = format!("class A\n{{\n    {member}\n}}");
    assert_breakpoint_name(&annotated, expected).await;
}

#[tokio::test]
async fn test_property_initializer_form() {
    assert_breakpoint_name(
        r#"
class A
{
    int [|B|] { get; set; } = 3;
}"#,
        Some("A.B"),
    )
    .await;
}

// =============================================================================
// EVENTS
// =============================================================================

#[tokio::test]
async fn test_entire_event_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    event System.Action [|B|];
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_entire_event_custom_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    event System.Action [|B|] { add { } remove { } }
}"#,
        None,
    )
    .await;
}

#[rstest]
#[case("event System.Action B { [|add|] => _ = value; remove => _ = value; }", Some("A.add_B"))]
#[case("event System.Action B { [|add|] { } remove { } }", Some("A.add_B"))]
#[case("event System.Action B { add => _ = value; [|remove|] => _ = value; }", Some("A.remove_B"))]
#[case("event System.Action B { add { } [|remove|] { } }", Some("A.remove_B"))]
#[tokio::test]
async fn test_event_accessors(#[case] member: &str, #[case] expected: Option<&str>) {
    let annotated = format!("class A\n{{\n    {member}\n}}");
    assert_breakpoint_name(&annotated, expected).await;
}

// =============================================================================
// CONSTRUCTORS AND DESTRUCTORS
// =============================================================================

#[tokio::test]
async fn test_constructor_in_dotted_namespace() {
    assert_breakpoint_name(
        r#"
namespace N.M
{
    class C
    {
        [|C|]() { }
    }
}"#,
        Some("N.M.C.C"),
    )
    .await;
}

#[tokio::test]
async fn test_instance_constructor_with_initializer() {
    assert_breakpoint_name(
        r#"
class A
{
    public [|A|](int x) : this() { }
    public A() { }
}"#,
        Some("A.A"),
    )
    .await;
}

#[tokio::test]
async fn test_static_constructor() {
    assert_breakpoint_name(
        r#"
class A
{
    static [|A|]() { }
}"#,
        Some("A.cctor"),
    )
    .await;
}

#[tokio::test]
async fn test_static_constructor_in_struct_returns_nothing() {
    assert_breakpoint_name(
        r#"
struct A
{
    static [|A|]() { }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_instance_constructor_in_struct() {
    assert_breakpoint_name(
        r#"
struct A
{
    public [|A|](int x) { }
}"#,
        Some("A.A"),
    )
    .await;
}

#[tokio::test]
async fn test_destructor() {
    assert_breakpoint_name(
        r#"
class A
{
    ~[|A|]() { }
}"#,
        Some("A.Finalize"),
    )
    .await;
}

#[tokio::test]
async fn test_destructor_selection_with_tilde_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    [|~A|]() { }
}"#,
        None,
    )
    .await;
}

// =============================================================================
// INDEXERS
// =============================================================================

#[tokio::test]
async fn test_indexer() {
    assert_breakpoint_name(
        r#"
class A
{
    int [|this|][int i] => i;
}"#,
        Some("A.Item"),
    )
    .await;
}

#[tokio::test]
async fn test_indexer_custom_name() {
    assert_breakpoint_name(
        r#"
class A
{
    [IndexerName("Chars")]
    int [|this|][int i] => i;
}"#,
        Some("A.Chars"),
    )
    .await;
}

#[tokio::test]
async fn test_indexer_get_accessor() {
    assert_breakpoint_name(
        r#"
class A
{
    int this[int i] { [|get|] { return i; } set { } }
}"#,
        Some("A.Item.get"),
    )
    .await;
}

#[tokio::test]
async fn test_indexer_set_accessor_with_custom_name() {
    assert_breakpoint_name(
        r#"
class A
{
    [IndexerName("Chars")]
    int this[int i] { get => i; [|set|] { } }
}"#,
        Some("A.Chars.set"),
    )
    .await;
}

#[tokio::test]
async fn test_indexer_parameter_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    int this[int [|i|]] => i;
}"#,
        None,
    )
    .await;
}

// =============================================================================
// EXPLICIT INTERFACE IMPLEMENTATIONS
// =============================================================================

#[tokio::test]
async fn test_explicit_interface_method_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A : I
{
    void I.[|B|]() { }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_explicit_interface_property_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A : I
{
    int I.[|B|] { get; }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_explicit_interface_property_accessor_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A : I
{
    int I.B { [|get|] => 0; }
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_explicit_interface_indexer_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A : I
{
    int I.[|this|][int i] => i;
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_explicit_interface_generic_qualifier_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A : IList<int>
{
    int IList<int>.[|Count|] => 0;
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_explicit_interface_event_accessor_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A : I
{
    event System.Action I.B { [|add|] { } remove { } }
}"#,
        None,
    )
    .await;
}

// =============================================================================
// OPERATORS
// =============================================================================

#[rstest]
#[case("public static A operator [|+|](A a) => a;", Some("A.op_UnaryPlus"))]
#[case("public static A operator [|+|](A a, A b) => a;", Some("A.op_Addition"))]
#[case("public static A operator [|-|](A a) => a;", Some("A.op_UnaryNegation"))]
#[case("public static A operator [|-|](A a, A b) => a;", Some("A.op_Subtraction"))]
#[case("public static A operator [|!|](A a) => a;", Some("A.op_LogicalNot"))]
#[case("public static A operator [|~|](A a) => a;", Some("A.op_OnesComplement"))]
#[case("public static A operator [|++|](A a) => a;", Some("A.op_Increment"))]
#[case("public static A operator [|--|](A a) => a;", Some("A.op_Decrement"))]
#[case("public static bool operator [|true|](A a) => true;", Some("A.op_True"))]
#[case("public static bool operator [|false|](A a) => false;", Some("A.op_False"))]
#[case("public static A operator [|*|](A a, A b) => a;", Some("A.op_Multiply"))]
#[case("public static A operator [|/|](A a, A b) => a;", Some("A.op_Division"))]
#[case("public static A operator [|%|](A a, A b) => a;", Some("A.op_Modulus"))]
#[case("public static A operator [|&|](A a, A b) => a;", Some("A.op_BitwiseAnd"))]
#[case("public static A operator [#](A a, A b) => a;", Some("A.op_BitwiseOr"))]
#[case("public static A operator [|^|](A a, A b) => a;", Some("A.op_ExclusiveOr"))]
#[case("public static A operator [|<<|](A a, int b) => a;", Some("A.op_LeftShift"))]
#[case("public static A operator [|>>|](A a, int b) => a;", Some("A.op_RightShift"))]
#[case("public static A operator [|>>>|](A a, int b) => a;", Some("A.op_UnsignedRightShift"))]
#[case("public static bool operator [|==|](A a, A b) => true;", Some("A.op_Equality"))]
#[case("public static bool operator [|!=|](A a, A b) => false;", Some("A.op_Inequality"))]
#[case("public static bool operator [|<|](A a, A b) => true;", Some("A.op_LessThan"))]
#[case("public static bool operator [|>|](A a, A b) => false;", Some("A.op_GreaterThan"))]
#[case("public static bool operator [|<=|](A a, A b) => true;", Some("A.op_LessThanOrEqual"))]
#[case("public static bool operator [|>=|](A a, A b) => false;", Some("A.op_GreaterThanOrEqual"))]
#[tokio::test]
async fn test_operator_names(#[case] member: &str, #[case] expected: Option<&str>) {
    // `[#]` stands in for a selected `|`, which cannot be written inside
    // the [|...|] markers
    let member = member.replace("[#]", "[|||]");
    let annotated = format!("class A\n{{\n    {member}\n}}");
    assert_breakpoint_name(&annotated, expected).await;
}

#[tokio::test]
async fn test_operator_keyword_selection() {
    assert_breakpoint_name(
        r#"
class A
{
    public static A [|operator|] +(A a) => a;
}"#,
        Some("A.op_UnaryPlus"),
    )
    .await;
}

#[tokio::test]
async fn test_operator_keyword_and_token_selection() {
    assert_breakpoint_name(
        r#"
class A
{
    public static A [|operator +|](A a) => a;
}"#,
        Some("A.op_UnaryPlus"),
    )
    .await;
}

#[tokio::test]
async fn test_operator_gap_selection() {
    // Selecting only the whitespace between `operator` and `+` still
    // identifies the operator
    assert_breakpoint_name(
        r#"
class A
{
    public static A operator[| |]+(A a) => a;
}"#,
        Some("A.op_UnaryPlus"),
    )
    .await;
}

#[tokio::test]
async fn test_operator_selection_starting_before_keyword_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    public static A[| operator +|](A a) => a;
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_operator_selection_ending_past_token_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    public static A [|operator +(|]A a) => a;
}"#,
        None,
    )
    .await;
}

// =============================================================================
// CONVERSION OPERATORS
// =============================================================================

#[tokio::test]
async fn test_implicit_conversion_operator() {
    assert_breakpoint_name(
        r#"
class A
{
    public static implicit [|operator|] int(A a) => 0;
}"#,
        Some("A.op_Implicit"),
    )
    .await;
}

#[tokio::test]
async fn test_explicit_conversion_operator() {
    assert_breakpoint_name(
        r#"
class A
{
    public static explicit [|operator|] int(A a) => 0;
}"#,
        Some("A.op_Explicit"),
    )
    .await;
}

#[tokio::test]
async fn test_conversion_modifier_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    public static [|implicit|] operator int(A a) => 0;
}"#,
        None,
    )
    .await;
}

#[tokio::test]
async fn test_conversion_target_type_selection_returns_nothing() {
    assert_breakpoint_name(
        r#"
class A
{
    public static implicit operator [|int|](A a) => 0;
}"#,
        None,
    )
    .await;
}

// =============================================================================
// METADATA SOURCE FAULTS
// =============================================================================

struct FailingSource;

impl MetadataNameSource for FailingSource {
    async fn metadata_name(
        &self,
        _member: &SyntaxNode,
        _cancel: &CancellationToken,
    ) -> Result<SmolStr, MetadataNameError> {
        Err(MetadataNameError::Host("semantic model unavailable".into()))
    }
}

fn parse_selection(annotated: &str) -> (breakname::Parse, TextRange) {
    let (source, selection) = helpers::annotated_source::parse_annotated(annotated);
    let parsed = breakname::parse(&source);
    assert!(parsed.ok(), "parse errors: {:?}", parsed.errors);
    (parsed, selection)
}

#[tokio::test]
async fn test_lookup_fault_propagates_for_operators() {
    let (parsed, selection) =
        parse_selection("class A { public static A operator [|+|](A a) => a; }");
    let result = breakname::breakpoint_name(
        &parsed.syntax(),
        selection,
        &FailingSource,
        &CancellationToken::new(),
    )
    .await;
    assert_eq!(
        result,
        Err(MetadataNameError::Host("semantic model unavailable".into()))
    );
}

#[tokio::test]
async fn test_lookup_not_consulted_for_methods() {
    let (parsed, selection) = parse_selection("class A { void [|B|]() { } }");
    let result = breakname::breakpoint_name(
        &parsed.syntax(),
        selection,
        &FailingSource,
        &CancellationToken::new(),
    )
    .await;
    assert_eq!(result, Ok(Some("A.B".to_string())));
}

#[tokio::test]
async fn test_cancelled_lookup_fails_resolution() {
    let (parsed, selection) = parse_selection("class A { int [|this|][int i] => i; }");
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = breakname::breakpoint_name(
        &parsed.syntax(),
        selection,
        &SyntacticNameSource,
        &cancel,
    )
    .await;
    assert_eq!(result, Err(MetadataNameError::Cancelled));
}

// =============================================================================
// RENDER PURITY
// =============================================================================

#[tokio::test]
async fn test_resolve_then_render_twice() {
    let (parsed, selection) = parse_selection(
        r#"
namespace A.B
{
    class C
    {
        int D { [|get|]; }
    }
}"#,
    );
    let target = breakname::resolve_target(
        &parsed.syntax(),
        selection,
        &SyntacticNameSource,
        &CancellationToken::new(),
    )
    .await
    .unwrap()
    .expect("selection should resolve");
    assert_eq!(target.render(), "A.B.C.D.get");
    assert_eq!(target.render(), target.render());
}

#[tokio::test]
async fn test_zero_width_equivalent_to_one_width() {
    let caret = function_breakpoint_name("class A { void [||]B() { } }").await;
    let width_one = function_breakpoint_name("class A { void [|B|]() { } }").await;
    assert_eq!(caret, width_one);
}
