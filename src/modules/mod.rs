pub mod batch_upload;
