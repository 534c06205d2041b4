use pretty_assertions::assert_eq;
use sg_derive::{derive_equals, derive_hash_code, derive_to_string};
use sg_model::{Accessor, ClassDef, ClassTypeDef, Expr, MethodDef, PropertyDef, TypeDef};

use crate::{render, Dialect, EmitError, KotlinGenerator, SourceGenerator};

fn bean_object(properties: &[PropertyDef]) -> ClassDef {
    let bean = ClassTypeDef::of("com.example.Bean");
    let mut builder = ClassDef::builder("com.example.BeanObject").final_class();
    builder
        .add_method(derive_to_string(&bean, properties))
        .add_method(derive_equals(&bean, properties))
        .add_method(derive_hash_code(&bean, properties));
    builder.build()
}

fn render_kotlin(class: &ClassDef) -> Result<String, EmitError> {
    render(&KotlinGenerator, class)
}

#[test]
fn generator_identity() {
    assert_eq!(KotlinGenerator.dialect(), Dialect::Kotlin);
    assert_eq!(KotlinGenerator.file_extension(), "kt");
}

#[test]
fn bean_object_declaration() {
    let properties = [
        PropertyDef::new("name", TypeDef::string()),
        PropertyDef::new("age", TypeDef::INT),
        PropertyDef::new("active", TypeDef::BOOLEAN),
    ];
    let source = render_kotlin(&bean_object(&properties)).unwrap_or_else(|e| panic!("{e}"));
    let expected = r#"// Generated by sgc. Do not edit.
package com.example

object BeanObject {
    @JvmStatic
    fun toString(instance: Bean): String {
        val strBuilder: StringBuilder = StringBuilder("Bean[")
        return strBuilder.append("name=").append(instance.getName()).append(", ").append("age=").append(instance.getAge()).append(", ").append("active=").append(instance.isActive()).append("]").toString()
    }

    @JvmStatic
    fun equals(instance: Bean, o: Any?): Boolean {
        if (instance === o) {
            return true
        }
        if (o == null || instance.javaClass !== o.javaClass) {
            return false
        }
        val other: Bean = o as Bean
        return (instance.getName() === other.getName() || (instance.getName() != null && instance.getName().equals(other.getName()))) && instance.getAge() == other.getAge() && instance.isActive() == other.isActive()
    }

    @JvmStatic
    fun hashCode(instance: Bean?): Int {
        if (instance == null) {
            return 0
        }
        var hashValue: Int = 1
        hashValue = (hashValue * 59) + (if (instance.getName() == null) 43 else instance.getName().hashCode())
        hashValue = (hashValue * 59) + instance.getAge()
        hashValue = (hashValue * 59) + (if (instance.isActive()) 79 else 97)
        return hashValue
    }
}
"#;
    assert_eq!(source, expected);
}

#[test]
fn numeric_contributions_use_conversions() {
    let properties = [
        PropertyDef::new("total", TypeDef::LONG),
        PropertyDef::new("ratio", TypeDef::DOUBLE),
        PropertyDef::new("scale", TypeDef::FLOAT),
        PropertyDef::new("grade", TypeDef::CHAR),
        PropertyDef::new("small", TypeDef::SHORT),
        PropertyDef::new("tiny", TypeDef::BYTE),
    ];
    let source = render_kotlin(&bean_object(&properties)).unwrap_or_else(|e| panic!("{e}"));
    for line in [
        "hashValue = (hashValue * 59) + ((instance.getTotal() ushr 32) xor instance.getTotal()).toInt()",
        "hashValue = (hashValue * 59) + ((java.lang.Double.doubleToLongBits(instance.getRatio()) ushr 32) xor java.lang.Double.doubleToLongBits(instance.getRatio())).toInt()",
        "hashValue = (hashValue * 59) + java.lang.Float.floatToIntBits(instance.getScale())",
        "hashValue = (hashValue * 59) + (instance.getGrade() - '0')",
        "hashValue = (hashValue * 59) + (instance.getSmall().toInt() and 65535)",
        "hashValue = (hashValue * 59) + instance.getTiny().toInt()",
    ] {
        assert!(source.contains(line), "missing `{line}` in\n{source}");
    }
    // primitive equality stays `==`
    assert!(source.contains("instance.getTotal() == other.getTotal()"));
    assert!(source.contains("instance.getGrade() == other.getGrade()"));
}

#[test]
fn array_types() {
    let properties = [
        PropertyDef::new("tags", TypeDef::array(TypeDef::string(), 1)),
        PropertyDef::new("grid", TypeDef::array(TypeDef::INT, 2)),
    ];
    let source = render_kotlin(&bean_object(&properties)).unwrap_or_else(|e| panic!("{e}"));
    assert!(source.contains(".append(java.util.Arrays.deepToString(instance.getGrid()))"));
    assert!(source.contains("java.util.Arrays.equals(instance.getTags(), other.getTags())"));

    let method = MethodDef::builder("first")
        .static_method()
        .returns(TypeDef::array(TypeDef::INT, 1))
        .parameter("grid", TypeDef::array(TypeDef::INT, 2))
        .parameter("names", TypeDef::array(TypeDef::string(), 2))
        .build(|_| Expr::null().returning());
    let mut builder = ClassDef::builder("Util");
    builder.add_method(method);
    let source = render_kotlin(&builder.build()).unwrap_or_else(|e| panic!("{e}"));
    assert!(
        source.contains("fun first(grid: Array<IntArray>, names: Array<Array<String>>): IntArray {"),
        "{source}"
    );
}

#[test]
fn keywords_are_backticked() {
    let properties = [PropertyDef::new("kind", TypeDef::INT)
        .with_accessor(Some(Accessor::Field("object".to_owned())))];
    let source = render_kotlin(&bean_object(&properties)).unwrap_or_else(|e| panic!("{e}"));
    assert!(source.contains("append(instance.`object`)"), "{source}");
}

#[test]
fn invalid_identifier_is_rejected() {
    let properties = [PropertyDef::new("kind", TypeDef::INT)
        .with_accessor(Some(Accessor::Method("get-kind".to_owned())))];
    assert_eq!(
        render_kotlin(&bean_object(&properties)),
        Err(EmitError::InvalidIdentifier {
            dialect: Dialect::Kotlin,
            name: "get-kind".to_owned(),
        })
    );
}

#[test]
fn string_templates_are_escaped() {
    let method = MethodDef::builder("price")
        .static_method()
        .returns(TypeDef::string())
        .build(|_| Expr::constant("$5").returning());
    let min = MethodDef::builder("min")
        .static_method()
        .returns(TypeDef::INT)
        .build(|_| Expr::constant(i32::MIN).returning());
    let mut builder = ClassDef::builder("com.example.Lit");
    builder.add_method(method).add_method(min);
    let source = render_kotlin(&builder.build()).unwrap_or_else(|e| panic!("{e}"));
    assert!(source.contains(r#"return "\$5""#), "{source}");
    assert!(source.contains("return Int.MIN_VALUE"), "{source}");
}

#[test]
fn foreign_types_are_qualified() {
    let method = MethodDef::builder("stamp")
        .returns(TypeDef::Class(ClassTypeDef::of("java.time.Instant").nullable()))
        .parameter("raw", TypeDef::class("java.lang.Integer"))
        .build(|_| Expr::null().returning());
    let mut builder = ClassDef::builder("com.example.Util");
    builder.add_method(method);
    let source = render_kotlin(&builder.build()).unwrap_or_else(|e| panic!("{e}"));
    assert!(
        source.contains("    fun stamp(raw: Int): java.time.Instant? {\n        return null\n    }"),
        "{source}"
    );
    assert!(!source.contains("@JvmStatic"));
}
