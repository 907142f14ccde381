//! Procedural macros for flightgen
//!
//! This crate provides the `Record` derive macro, which describes a plain
//! struct as a database table so the flightgen persistence layer can create
//! it and upsert rows into it.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Ident, LitStr, Type};

/// Table-level arguments: `#[record(table = "...", unique = "a, b")]`
struct TableArgs {
    table: Option<String>,
    unique: Vec<Vec<String>>,
}

/// Column-level arguments collected from a field
struct ColumnArgs {
    ident: Ident,
    name: String,
    sql_type: String,
    primary_key: bool,
    nullable: bool,
    references: Option<String>,
}

/// Derive macro for flightgen tables
///
/// ```ignore
/// #[derive(Record)]
/// #[record(table = "airline")]
/// pub struct Airline {
///     #[record(primary_key, sql_type = "VARCHAR(2)")]
///     pub iata: String,
///     #[record(rename = "airline", sql_type = "VARCHAR(100)")]
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_record(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let table_args = parse_table_args(&input)?;
    let table = table_args.table.ok_or_else(|| {
        syn::Error::new_spanned(name, "missing #[record(table = \"...\")] on struct")
    })?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Record only supports structs")),
    };

    let columns = fields
        .iter()
        .map(parse_column_args)
        .collect::<syn::Result<Vec<_>>>()?;

    // Unique keys must name declared columns
    for key in &table_args.unique {
        for column in key {
            if !columns.iter().any(|c| &c.name == column) {
                return Err(syn::Error::new_spanned(
                    name,
                    format!("unique key references unknown column `{}`", column),
                ));
            }
        }
    }

    let column_defs = columns.iter().map(|c| {
        let column_name = &c.name;
        let sql_type = &c.sql_type;
        let primary_key = c.primary_key;
        let nullable = c.nullable;
        let references = match &c.references {
            Some(target) => quote!(::std::option::Option::Some(#target)),
            None => quote!(::std::option::Option::None),
        };

        quote! {
            flightgen::models::ColumnDef {
                name: #column_name,
                sql_type: #sql_type,
                primary_key: #primary_key,
                nullable: #nullable,
                references: #references,
            }
        }
    });

    let unique_keys = table_args.unique.iter().map(|key| quote!(::std::vec![#(#key),*]));
    let idents = columns.iter().map(|c| &c.ident);

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics flightgen::models::Record for #name #ty_generics #where_clause {
            fn table_name() -> &'static str {
                #table
            }

            fn columns() -> ::std::vec::Vec<flightgen::models::ColumnDef> {
                ::std::vec![#(#column_defs),*]
            }

            fn unique_keys() -> ::std::vec::Vec<::std::vec::Vec<&'static str>> {
                ::std::vec![#(#unique_keys),*]
            }

            fn values(&self) -> ::std::vec::Vec<flightgen::models::SqlValue> {
                ::std::vec![#(flightgen::models::SqlValue::from(&self.#idents)),*]
            }
        }
    })
}

fn parse_table_args(input: &DeriveInput) -> syn::Result<TableArgs> {
    let mut args = TableArgs {
        table: None,
        unique: Vec::new(),
    };

    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let value: LitStr = meta.value()?.parse()?;
                args.table = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("unique") {
                let value: LitStr = meta.value()?.parse()?;
                let key: Vec<String> = value
                    .value()
                    .split(',')
                    .map(|column| column.trim().to_string())
                    .filter(|column| !column.is_empty())
                    .collect();

                if key.is_empty() {
                    return Err(meta.error("unique key needs at least one column"));
                }

                args.unique.push(key);
                Ok(())
            } else {
                Err(meta.error("expected `table` or `unique`"))
            }
        })?;
    }

    Ok(args)
}

fn parse_column_args(field: &Field) -> syn::Result<ColumnArgs> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Record fields must be named"))?;

    let mut name = ident.to_string();
    let mut sql_type = None;
    let mut primary_key = false;
    let mut references = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                primary_key = true;
                Ok(())
            } else if meta.path.is_ident("sql_type") {
                let value: LitStr = meta.value()?.parse()?;
                sql_type = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else if meta.path.is_ident("references") {
                let value: LitStr = meta.value()?.parse()?;
                references = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `primary_key`, `sql_type`, `rename` or `references`"))
            }
        })?;
    }

    let sql_type = sql_type.ok_or_else(|| {
        syn::Error::new_spanned(field, "missing #[record(sql_type = \"...\")] on field")
    })?;

    Ok(ColumnArgs {
        nullable: is_option(&field.ty),
        ident,
        name,
        sql_type,
        primary_key,
        references,
    })
}

/// `Option<T>` fields map to nullable columns
fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => {
            path.qself.is_none()
                && path
                    .path
                    .segments
                    .last()
                    .map_or(false, |segment| segment.ident == "Option")
        }
        _ => false,
    }
}
