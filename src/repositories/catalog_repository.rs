//! Repositorio del agregado de catálogo
//!
//! El catálogo es una sola fila con la lista ordenada de ids de autos.
//! La reconciliación solo agrega ids faltantes; nunca quita.

use sqlx::PgPool;

use crate::models::catalog::Catalog;
use crate::utils::errors::AppError;

/// Agrega a `existentes` los ids autoritativos que falten, preservando
/// el orden original. Devuelve la lista resultante y cuántos se agregaron.
pub fn merge_missing(existentes: &[i64], autoritativos: &[i64]) -> (Vec<i64>, usize) {
    let mut resultado = existentes.to_vec();
    let mut agregados = 0;

    for id in autoritativos {
        if !resultado.contains(id) {
            resultado.push(*id);
            agregados += 1;
        }
    }

    (resultado, agregados)
}

pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cargar el agregado, creando la fila vacía si no existe
    pub async fn load_or_create(&self) -> Result<Catalog, AppError> {
        let catalog = sqlx::query_as::<_, Catalog>(
            r#"
            INSERT INTO catalogo (id, auto_ids, updated_at)
            VALUES (1, '{}', now())
            ON CONFLICT (id) DO UPDATE SET id = catalogo.id
            RETURNING *
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(catalog)
    }

    pub async fn save(&self, auto_ids: &[i64]) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO catalogo (id, auto_ids, updated_at)
            VALUES (1, $1, now())
            ON CONFLICT (id) DO UPDATE SET auto_ids = $1, updated_at = now()
            "#,
        )
        .bind(auto_ids)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Agregar un id al final del agregado si todavía no está.
    /// Usado tras crear un vehículo; el caller decide si el fallo es fatal.
    pub async fn append_id(&self, auto_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO catalogo (id, auto_ids, updated_at)
            VALUES (1, ARRAY[$1::bigint], now())
            ON CONFLICT (id) DO UPDATE
            SET auto_ids = CASE
                    WHEN $1 = ANY(catalogo.auto_ids) THEN catalogo.auto_ids
                    ELSE array_append(catalogo.auto_ids, $1)
                END,
                updated_at = now()
            "#,
        )
        .bind(auto_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_missing_agrega_faltantes() {
        // 2 de 5 en el agregado: la reconciliación deja exactamente 5
        let existentes = vec![3, 1];
        let autoritativos = vec![1, 2, 3, 4, 5];

        let (resultado, agregados) = merge_missing(&existentes, &autoritativos);

        assert_eq!(resultado, vec![3, 1, 2, 4, 5]);
        assert_eq!(agregados, 3);
    }

    #[test]
    fn test_merge_missing_idempotente() {
        let autoritativos = vec![1, 2, 3];
        let (primera, _) = merge_missing(&[], &autoritativos);
        let (segunda, agregados) = merge_missing(&primera, &autoritativos);

        assert_eq!(primera, segunda);
        assert_eq!(agregados, 0);
    }

    #[test]
    fn test_merge_missing_nunca_quita() {
        // Un id que ya no existe en la fuente autoritativa se conserva
        let existentes = vec![99];
        let (resultado, _) = merge_missing(&existentes, &[1]);

        assert_eq!(resultado, vec![99, 1]);
    }
}
