use proc_macro::TokenStream;
use quote::quote;
use quote::quote_spanned;
use syn::spanned::Spanned;

/// Turns a function into a test case of the notes API run.
///
/// `#[api_test(SCENARIO)]` or `#[api_test(SCENARIO, configure_fn)]`. The
/// function takes a `&mut notetest::TestContext` and may return a `Result`.
/// The report hook runs after the body whether it passes, panics or returns
/// an error.
#[proc_macro_attribute]
pub fn api_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let attributes = &input.attrs;
    let visibility = &input.vis;
    let signature = &input.sig;
    let name = &signature.ident;
    let parameters = &signature.inputs;
    let return_type = match &signature.output {
        syn::ReturnType::Default => quote! { -> () },
        output => quote! { #output },
    };
    let block = &input.block;

    if args.is_empty() || args.len() > 2 {
        return quote! {
            compile_error!("A scenario and an optional configuration function should be passed to the macro");
        }
        .into();
    }

    let scenario = match &args[0] {
        syn::NestedMeta::Meta(syn::Meta::Path(scenario)) => scenario,
        other => {
            return quote_spanned! {other.span()=>
                compile_error!("The first argument should be the path of a Scenario constant!");
            }
            .into()
        }
    };

    let configuration_function = match args.get(1) {
        Some(syn::NestedMeta::Meta(syn::Meta::Path(function_path))) => quote! { #function_path },
        Some(other) => {
            return quote_spanned! {other.span()=>
                compile_error!("The second argument should be a configuration function!");
            }
            .into()
        }
        None => quote! { notetest::keep_configuration },
    };

    if let Err(stream) = validate_signature(signature) {
        return stream.into();
    }

    let output = quote! {
        #(#attributes)*
        #[test]
        #visibility fn #name() {
            let mut __notetest_context =
                match notetest::TestRun::before_test(&#scenario, #configuration_function) {
                    Ok(context) => context,
                    Err(e) => panic!("Notetest Error: {}", e),
                };

            let __notetest_outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let __notetest_body = |#parameters| #return_type #block;
                __notetest_body(&mut __notetest_context)
            }));

            notetest::TestRun::after_test(__notetest_context, &__notetest_outcome);

            match __notetest_outcome {
                Ok(value) => {
                    if let Some(failure) = notetest::TestOutcome::failure(&value) {
                        panic!("{}", failure);
                    }
                }
                Err(e) => std::panic::resume_unwind(e),
            }
        }
    };

    TokenStream::from(output)
}

fn validate_signature(signature: &syn::Signature) -> Result<(), proc_macro2::TokenStream> {
    if let Some(asyncness) = &signature.asyncness {
        return Err(quote_spanned! {asyncness.span()=>
            compile_error!("API tests run on a blocking session and can't be async!");
        });
    }

    if signature.inputs.len() != 1 {
        return Err(quote_spanned! {signature.inputs.span()=>
            compile_error!("The test should take exactly one `&mut notetest::TestContext` argument!");
        });
    }

    if let Some(syn::FnArg::Receiver(receiver)) = signature.inputs.first() {
        return Err(quote_spanned! {receiver.span()=>
            compile_error!("API tests can't take `self`!");
        });
    }

    Ok(())
}
