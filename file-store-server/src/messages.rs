//! Human readable texts carried in the `mensaje` field of every response.

use clap::ValueEnum;

/// Language of the response messages. The JSON keys stay Spanish either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    #[default]
    Es,
    En,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    Listed,
    MissingCreateParams,
    InvalidFilename,
    AlreadyExists,
    Saved,
    SaveFailed,
    ReadOk,
    NotFound,
    MissingContent,
    DoesNotExist,
    Updated,
    UpdateFailed,
    Deleted,
    InternalError,
    MalformedBody,
}

impl Locale {
    pub fn text(self, message: Message) -> &'static str {
        use Message::*;
        match self {
            Locale::Es => match message {
                Listed => "Listado de ficheros",
                MissingCreateParams => "Faltan parámetros: filename y content son obligatorios",
                InvalidFilename => "Nombre de fichero no válido",
                AlreadyExists => "El archivo ya existe",
                Saved => "Guardado con éxito",
                SaveFailed => "Hubo un error al guardar el fichero",
                ReadOk => "Archivo leído con éxito",
                NotFound => "Archivo no encontrado",
                MissingContent => "El parámetro content es obligatorio.",
                DoesNotExist => "El archivo no existe",
                Updated => "Actualizado con éxito",
                UpdateFailed => "Hubo un error al actualizar el fichero.",
                Deleted => "Eliminado con éxito",
                InternalError => "Error interno del servidor",
                MalformedBody => "El cuerpo de la petición no es JSON válido",
            },
            Locale::En => match message {
                Listed => "Listado de ficheros",
                MissingCreateParams => "Missing parameters: filename and content are required",
                InvalidFilename => "Invalid filename",
                AlreadyExists => "File already exists",
                Saved => "Saved successfully",
                SaveFailed => "An error occurred while saving the file",
                ReadOk => "File read successfully",
                NotFound => "File not found",
                MissingContent => "The content parameter is required.",
                DoesNotExist => "File does not exist",
                Updated => "Updated successfully",
                UpdateFailed => "An error occurred while updating the file",
                Deleted => "Deleted successfully",
                InternalError => "Internal server error",
                MalformedBody => "The request body is not valid JSON",
            },
        }
    }
}
