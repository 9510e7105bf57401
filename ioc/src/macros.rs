//! Public macros for declaring components.

/// Implements [`Component`](crate::Component) for a type, and
/// [`Record`](crate::Record) when it carries injection markers.
///
/// The declaration has up to three parts, in this order:
///
/// - the type, optionally followed by `as` and the capabilities (trait
///   objects) it can be injected as;
/// - `inject { ... }`: the [`Inject`](crate::Inject) fields to populate.
///   `field` resolves by the field's type, `field = "name"` by name;
/// - `hooks { ... }`: `after_inject` and/or `release`, for types that
///   implement [`Initializable`](crate::Initializable) or
///   [`Releasable`](crate::Releasable).
///
/// # Examples
///
/// ```
/// use fibre_inject::{component, Context, Inject};
///
/// trait Greeter {
///   fn greet(&self) -> String;
/// }
///
/// struct English;
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     "Hello!".to_string()
///   }
/// }
///
/// #[derive(Default)]
/// struct Frontdesk {
///   greeter: Inject<dyn Greeter>,
///   motto: Inject<&'static str>,
/// }
///
/// component!(English as dyn Greeter;);
/// component! {
///   Frontdesk;
///   inject { greeter, motto = "motto" };
/// }
///
/// let mut context = Context::new();
/// context.add(English).unwrap();
/// context.add_with_name("Be kind", "motto").unwrap();
/// context.add(Frontdesk::default()).unwrap();
/// context.start().unwrap();
///
/// let desk = context.get_by_type::<Frontdesk>().unwrap();
/// assert_eq!(desk.greeter.get().unwrap().greet(), "Hello!");
/// assert_eq!(*desk.motto.get().unwrap(), "Be kind");
/// ```
#[macro_export]
macro_rules! component {
  (
    $ty:ty $( as $( $capability:ty ),+ )? ;
    $( inject $fields:tt ; )?
    $( hooks { $( $hook:ident ),* $(,)? } ; )?
  ) => {
    impl $crate::Component for $ty {
      fn describe() -> $crate::TypeDescriptor {
        $crate::Describe::<$ty>::new()
          $( $(
            .implements::<$capability>(
              |shared: ::std::rc::Rc<$ty>| -> ::std::rc::Rc<$capability> { shared },
            )
          )+ )?
          .build()
      }

      $( $crate::__component_record!(@accessor $fields); )?
      $( $( $crate::__component_hook!($hook); )* )?
    }

    $( $crate::__component_record!($ty, $fields); )?
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __component_record {
  (@accessor $fields:tt) => {
    fn as_record(&self) -> ::std::option::Option<&dyn $crate::Record> {
      ::std::option::Option::Some(self)
    }
  };

  ($ty:ty, { $( $field:ident $( = $target:literal )? ),* $(,)? }) => {
    impl $crate::Record for $ty {
      fn schema(&self) -> &$crate::Schema {
        static SCHEMA: $crate::__private::Lazy<$crate::Schema> = $crate::__private::Lazy::new(|| {
          $crate::Schema::new(::std::vec![
            $(
              $crate::Marker::new(
                ::std::stringify!($field),
                ::std::concat!("" $(, $target)?),
                $crate::__private::field_key(|record: &$ty| &record.$field),
              ),
            )*
          ])
        });
        &SCHEMA
      }

      fn get_attribute(
        &self,
        field: &str,
      ) -> ::std::result::Result<
        ::std::option::Option<::std::boxed::Box<dyn ::std::any::Any>>,
        $crate::AccessError,
      > {
        $(
          if field == ::std::stringify!($field) {
            return ::std::result::Result::Ok($crate::Attribute::read(&self.$field));
          }
        )*
        ::std::result::Result::Err($crate::AccessError::FieldNotFound {
          record: ::std::any::type_name::<Self>(),
          field: field.to_owned(),
        })
      }

      fn set_attribute(
        &self,
        field: &str,
        value: ::std::option::Option<&$crate::Value>,
      ) -> ::std::result::Result<(), $crate::AccessError> {
        $(
          if field == ::std::stringify!($field) {
            return $crate::Attribute::assign(&self.$field, value)
              .map_err(|mismatch| mismatch.at(::std::any::type_name::<Self>(), field));
          }
        )*
        ::std::result::Result::Err($crate::AccessError::FieldNotFound {
          record: ::std::any::type_name::<Self>(),
          field: field.to_owned(),
        })
      }
    }
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __component_hook {
  (after_inject) => {
    fn as_initializable(&self) -> ::std::option::Option<&dyn $crate::Initializable> {
      ::std::option::Option::Some(self)
    }
  };

  (release) => {
    fn as_releasable(&self) -> ::std::option::Option<&dyn $crate::Releasable> {
      ::std::option::Option::Some(self)
    }
  };
}
