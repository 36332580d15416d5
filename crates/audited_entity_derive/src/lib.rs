use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Expr, ExprLit, Field, Fields, Ident, ItemStruct, Lit, Meta, Token, parse_macro_input,
    parse_quote, punctuated::Punctuated,
};

/// Completes a sea-orm `Model` with the columns every stored row carries:
/// a `Uuid` primary key, `created_user_id`, `updated_user_id`, `created_at`
/// and `updated_at`. The active model gets the matching setters from
/// `crate::db::dao::base_traits`.
///
/// `#[audited_entity(id = "task_id")]` renames the primary key column.
/// Columns the struct already declares are kept as written.
#[proc_macro_attribute]
pub fn audited_entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated<Meta, Token![,]>::parse_terminated);
    let mut input = parse_macro_input!(item as ItemStruct);
    match expand(args, &mut input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: Punctuated<Meta, Token![,]>, input: &mut ItemStruct) -> syn::Result<TokenStream2> {
    let id = id_column(args)?;
    let created_user = Ident::new("created_user_id", Span::call_site());
    let updated_user = Ident::new("updated_user_id", Span::call_site());
    let created_at = Ident::new("created_at", Span::call_site());
    let updated_at = Ident::new("updated_at", Span::call_site());

    let Fields::Named(fields) = &mut input.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "audited_entity requires a struct with named fields",
        ));
    };

    let declared = |name: &Ident| fields.named.iter().any(|f| f.ident.as_ref() == Some(name));
    let audit_columns: [(&Ident, Field); 4] = [
        (&created_user, parse_quote!(pub #created_user: uuid::Uuid)),
        (&updated_user, parse_quote!(pub #updated_user: uuid::Uuid)),
        (
            &created_at,
            parse_quote! {
                #[sea_orm(default_expr = "Expr::current_timestamp()")]
                pub #created_at: sea_orm::entity::prelude::DateTimeWithTimeZone
            },
        ),
        (
            &updated_at,
            parse_quote! {
                #[sea_orm(default_expr = "Expr::current_timestamp()")]
                pub #updated_at: sea_orm::entity::prelude::DateTimeWithTimeZone
            },
        ),
    ];
    let audit: Vec<Field> = audit_columns
        .into_iter()
        .filter(|(name, _)| !declared(name))
        .map(|(_, field)| field)
        .collect();
    let key: Option<Field> = (!declared(&id)).then(|| {
        parse_quote! {
            #[sea_orm(primary_key, auto_increment = false)]
            pub #id: uuid::Uuid
        }
    });

    // sea_orm::model wants relation fields after every column
    let (relations, columns): (Vec<Field>, Vec<Field>) =
        fields.named.iter().cloned().partition(is_relation);
    fields.named = key
        .into_iter()
        .chain(columns)
        .chain(audit)
        .chain(relations)
        .collect();

    let traits = quote!(crate::db::dao::base_traits);
    let timestamp = quote!(sea_orm::entity::prelude::DateTimeWithTimeZone);
    Ok(quote! {
        #input

        impl #traits::HasIdActiveModel for ActiveModel {
            fn set_id(&mut self, id: uuid::Uuid) {
                self.#id = sea_orm::ActiveValue::Set(id);
            }
        }

        impl #traits::TimestampedActiveModel for ActiveModel {
            fn set_created_at(&mut self, ts: #timestamp) {
                self.#created_at = sea_orm::ActiveValue::Set(ts);
            }

            fn set_updated_at(&mut self, ts: #timestamp) {
                self.#updated_at = sea_orm::ActiveValue::Set(ts);
            }
        }

        impl #traits::AuditedActiveModel for ActiveModel {
            fn set_created_user_id(&mut self, user_id: uuid::Uuid) {
                self.#created_user = sea_orm::ActiveValue::Set(user_id);
            }

            fn set_updated_user_id(&mut self, user_id: uuid::Uuid) {
                self.#updated_user = sea_orm::ActiveValue::Set(user_id);
            }
        }
    })
}

/// Name of the primary key column, `id` unless overridden.
fn id_column(args: Punctuated<Meta, Token![,]>) -> syn::Result<Ident> {
    let mut id = Ident::new("id", Span::call_site());
    for meta in args {
        let Meta::NameValue(pair) = meta else {
            return Err(syn::Error::new_spanned(meta, "expected `id = \"column\"`"));
        };
        if !pair.path.is_ident("id") {
            return Err(syn::Error::new_spanned(
                pair.path,
                "unknown audited_entity key, only `id` is supported",
            ));
        }
        let Expr::Lit(ExprLit {
            lit: Lit::Str(name),
            ..
        }) = &pair.value
        else {
            return Err(syn::Error::new_spanned(
                &pair.value,
                "expected a string literal column name",
            ));
        };
        id = Ident::new(&name.value(), name.span());
    }
    Ok(id)
}

fn is_relation(field: &Field) -> bool {
    let syn::Type::Path(ty) = &field.ty else {
        return false;
    };
    ty.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "HasOne" || segment.ident == "HasMany")
}
